//! Geometry module: integer cell coordinates and the viewport rectangle.
//!
//! There is no geometry beyond cells. Anchors may carry a fractional part;
//! it is truncated exactly once, when a cell's absolute position is computed.

mod point;
mod rect;

pub use point::{Point, Vec2};
pub use rect::Rect;
