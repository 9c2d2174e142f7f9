//! Buffer module: the cell grid behind a viewport.
//!
//! This module contains:
//! - [`Cell`]: One glyph with its resolved style
//! - [`Buffer`]: A grid of cells representing the viewport
//! - [`diff`]: Diffing engine for generating minimal ANSI sequences

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use cell::{Cell, CellFlags};
pub use buffer::Buffer;
