//! Surface module: layered text images.
//!
//! A surface is authored as three parallel layers:
//! - `image`: the characters
//! - `color`: one palette pair name (a single character) per image cell
//! - `attr`: one list of attribute tokens per image cell
//!
//! This module contains:
//! - [`Textel`]: One character cell with symbolic color and attributes
//! - [`Surface`]: An immutable named grid of textels
//! - [`SurfaceFile`]: The TOML document a surface is loaded from and saved to

mod file;
#[allow(clippy::module_inception)]
mod surface;
mod textel;

pub use file::SurfaceFile;
pub use surface::{Layers, Surface, Textels, UNTITLED};
pub use textel::Textel;
