//! Interpolation helpers shared by the samplers and the tick selector.

pub mod functions;

pub use functions::{frac, lerp_f32, raised_cosine, snap_index};
