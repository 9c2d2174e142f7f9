//! Backend module: the terminal the compositor writes to.
//!
//! The compositor only talks to the [`Backend`] trait. Two backends ship
//! with the crate:
//! - [`HeadlessBackend`]: an in-memory viewport, for tests and recording
//! - [`CrosstermBackend`]: a double-buffered real terminal
//!
//! ```text
//! ┌──────────┐  write_cell   ┌──────────────┐  refresh   ┌──────────┐
//! │ Renderer │ ────────────▶ │ back Buffer  │ ─────────▶ │ terminal │
//! └──────────┘               └──────────────┘   (diff)   └──────────┘
//! ```

mod headless;
mod terminal;

pub use headless::HeadlessBackend;
pub use terminal::{CrosstermBackend, TerminalConfig};

use crate::buffer::Buffer;
use crate::color::{ColorCode, Style};
use crate::error::{Error, Result};

/// Glyphs used for the viewport border frame.
pub mod border {
    /// Horizontal line.
    pub const HORIZONTAL: char = '─';
    /// Vertical line.
    pub const VERTICAL: char = '│';
    /// Top-left corner.
    pub const TOP_LEFT: char = '┌';
    /// Top-right corner.
    pub const TOP_RIGHT: char = '┐';
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: char = '└';
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: char = '┘';
}

/// A terminal viewport the compositor can draw into.
///
/// All coordinates are cells: `x` is the column, `y` the row.
pub trait Backend {
    /// Erase the whole viewport.
    fn erase(&mut self);

    /// Draw a one-cell frame around the viewport.
    fn draw_border(&mut self);

    /// Write one glyph. `None` uses the backend's default style.
    ///
    /// Fails with [`Error::OutOfBounds`] outside the viewport.
    fn write_cell(&mut self, x: i32, y: i32, glyph: char, style: Option<Style>) -> Result<()>;

    /// Flush pending writes to the physical display.
    fn refresh(&mut self) -> Result<()>;

    /// Current viewport size as `(width, height)`, queried live.
    fn size(&self) -> (u16, u16);

    /// Whether the terminal can show colors.
    fn supports_color(&self) -> bool;

    /// Define the colors of a pair slot.
    fn init_color_pair(&mut self, index: u16, fg: ColorCode, bg: ColorCode) -> Result<()>;

    /// Release the viewport and restore the terminal.
    fn destroy(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Write a glyph into a buffer, rejecting positions outside it.
fn write_to_buffer(buffer: &mut Buffer, x: i32, y: i32, glyph: char, style: Style) -> Result<()> {
    let out_of_bounds = || Error::OutOfBounds {
        x,
        y,
        width: buffer.width(),
        height: buffer.height(),
    };
    let col = u16::try_from(x).map_err(|_| out_of_bounds())?;
    let row = u16::try_from(y).map_err(|_| out_of_bounds())?;

    if buffer.index_of(col, row).is_none() {
        return Err(out_of_bounds());
    }
    buffer.set_glyph(col, row, glyph, style);
    Ok(())
}

/// Draw the border frame into a buffer.
fn draw_border_into(buffer: &mut Buffer, style: Style) {
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return;
    }
    let (right, bottom) = (width - 1, height - 1);

    for x in 1..right {
        buffer.set_glyph(x, 0, border::HORIZONTAL, style);
        buffer.set_glyph(x, bottom, border::HORIZONTAL, style);
    }
    for y in 1..bottom {
        buffer.set_glyph(0, y, border::VERTICAL, style);
        buffer.set_glyph(right, y, border::VERTICAL, style);
    }
    buffer.set_glyph(0, 0, border::TOP_LEFT, style);
    buffer.set_glyph(right, 0, border::TOP_RIGHT, style);
    buffer.set_glyph(0, bottom, border::BOTTOM_LEFT, style);
    buffer.set_glyph(right, bottom, border::BOTTOM_RIGHT, style);
}
