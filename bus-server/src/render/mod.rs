//! Segment map rendering.

mod map;

pub use map::{MapRenderer, RenderError};
