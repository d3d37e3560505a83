//! Identifiers for registered entities.

use serde::{Deserialize, Serialize};

/// Dense handle of a registered entity.
/// Handles are assigned in registration order and index the registry directly;
/// the string id is only looked up once at the ingestion boundary.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct EntityIdx(pub u32);

impl EntityIdx {
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
