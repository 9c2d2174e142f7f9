//! Color module: named color pairs and text attributes.
//!
//! This module contains:
//! - [`ColorCode`]: A terminal color number
//! - [`Attr`]: Text attribute bitflags
//! - [`Style`]: The resolved style value handed to a backend
//! - [`ColorPair`]: One registered (index, fg, bg) slot
//! - [`Palette`]: The registry resolving names to styles

mod code;
mod pair;
mod palette;
mod style;

pub use code::ColorCode;
pub use pair::ColorPair;
pub use palette::{AttrToken, ColorKey, Palette, PaletteEntry, DEFAULT_PAIR_NAME};
pub use style::{Attr, Style};
