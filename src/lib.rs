//! # xo1
//!
//! Layered text surfaces, named color pairs, and a clipping compositor
//! for terminal applications.
//!
//! ## Core Concepts
//!
//! - **Surface**: an immutable grid of textels built from parallel image,
//!   color and attribute layers
//! - **Palette**: maps color names to color pairs; styles are resolved per
//!   frame against whichever palette is active
//! - **Renderer**: draws objects in priority order, clipping the border ring
//!   and skipping invisible glyphs
//! - **Backend**: the viewport; headless for tests, crossterm for terminals
//!
//! ## Example
//!
//! ```rust
//! use xo1::{ColorCode, HeadlessBackend, Layers, Palette, Renderer, Sprite, Surface};
//!
//! let palette = Palette::with_entries([("r", ColorCode::RED, ColorCode::BLACK)])?;
//! let ship = Surface::from_layers("ship", Layers::new(&["/\\"]).with_color(&["rr"]))?;
//! let sprite = Sprite::new(ship, (3, 2));
//!
//! let mut renderer = Renderer::new(HeadlessBackend::new(10, 5));
//! renderer.clear();
//! renderer.render_objects(&[&sprite], &palette)?;
//! renderer.present()?;
//!
//! assert_eq!(renderer.backend().glyph(3, 2), Some('/'));
//! # Ok::<(), xo1::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod backend;
pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod surface;

// Re-exports for convenience
pub use app::{AppConfig, Application, InputEvent, KeyCode, KeyModifiers};
pub use backend::{Backend, CrosstermBackend, HeadlessBackend, TerminalConfig};
pub use buffer::{Buffer, Cell};
pub use color::{Attr, AttrToken, ColorCode, ColorKey, ColorPair, Palette, PaletteEntry, Style};
pub use config::Config;
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Vec2};
pub use render::{CellStyle, DrawCell, Drawable, FrameStats, Label, Renderer, Sprite};
pub use surface::{Layers, Surface, SurfaceFile, Textel};
