//! Entity registry: owns every entity, in registration order.
//!
//! Lookups by string id go through an insertion-ordered map so that
//! registration order doubles as the stable tie-break order for ranking.

use indexmap::IndexMap;

use crate::entity::Entity;
use crate::error::RaceError;
use crate::ids::EntityIdx;

#[derive(Clone, Debug, Default)]
pub struct Registry {
    entities: IndexMap<String, Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Handle the next inserted entity will receive.
    #[inline]
    pub(crate) fn next_idx(&self) -> EntityIdx {
        EntityIdx::from_index(self.entities.len())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn idx_of(&self, id: &str) -> Option<EntityIdx> {
        self.entities.get_index_of(id).map(EntityIdx::from_index)
    }

    pub fn get(&self, idx: EntityIdx) -> Option<&Entity> {
        self.entities.get_index(idx.index()).map(|(_, e)| e)
    }

    pub fn by_id(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Entities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub(crate) fn get_mut(&mut self, idx: EntityIdx) -> Option<&mut Entity> {
        self.entities.get_index_mut(idx.index()).map(|(_, e)| e)
    }

    pub(crate) fn by_id_mut(&mut self, id: &str) -> Result<&mut Entity, RaceError> {
        self.entities
            .get_mut(id)
            .ok_or_else(|| RaceError::UnknownEntity(id.to_string()))
    }

    pub(crate) fn insert(&mut self, entity: Entity) -> Result<EntityIdx, RaceError> {
        if self.entities.contains_key(&entity.id) {
            return Err(RaceError::DuplicateEntity(entity.id));
        }
        let idx = entity.idx;
        debug_assert_eq!(idx, self.next_idx());
        self.entities.insert(entity.id.clone(), entity);
        Ok(idx)
    }
}
