//! Headless backend: an in-memory viewport.
//!
//! Nothing reaches a real terminal. The viewport content, the initialized
//! pairs and the refresh count can be inspected from tests.

use super::{draw_border_into, write_to_buffer, Backend};
use crate::buffer::diff::PairTable;
use crate::buffer::Buffer;
use crate::color::{ColorCode, Style};
use crate::error::Result;
use log::debug;

/// An in-memory [`Backend`].
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    /// Viewport content.
    buffer: Buffer,
    /// Initialized pairs.
    pairs: PairTable,
    /// Whether to report color support.
    color: bool,
    /// Number of `refresh` calls.
    refreshes: u64,
    /// Set once `destroy` ran.
    destroyed: bool,
}

impl HeadlessBackend {
    /// Create a viewport of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            pairs: PairTable::new(),
            color: true,
            refreshes: 0,
            destroyed: false,
        }
    }

    /// Set whether the backend reports color support (builder pattern).
    #[must_use]
    pub const fn with_color_support(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Simulate a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer.resize(width, height);
    }

    /// The viewport content.
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// The glyph at (x, y).
    pub fn glyph(&self, x: u16, y: u16) -> Option<char> {
        self.buffer.glyph(x, y)
    }

    /// The style at (x, y).
    pub fn style(&self, x: u16, y: u16) -> Option<Style> {
        self.buffer.get(x, y).map(|cell| cell.style())
    }

    /// All rows as text.
    pub fn lines(&self) -> Vec<String> {
        (0..self.buffer.height())
            .map(|y| self.buffer.row_text(y))
            .collect()
    }

    /// The colors a pair was initialized with.
    pub fn color_pair(&self, index: u16) -> Option<(ColorCode, ColorCode)> {
        self.pairs.get(&index).copied()
    }

    /// Number of times the viewport was refreshed.
    pub const fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    /// Whether the viewport was destroyed.
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Backend for HeadlessBackend {
    fn erase(&mut self) {
        self.buffer.clear();
    }

    fn draw_border(&mut self) {
        draw_border_into(&mut self.buffer, Style::DEFAULT);
    }

    fn write_cell(&mut self, x: i32, y: i32, glyph: char, style: Option<Style>) -> Result<()> {
        write_to_buffer(&mut self.buffer, x, y, glyph, style.unwrap_or_default())
    }

    fn refresh(&mut self) -> Result<()> {
        self.refreshes += 1;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.buffer.width(), self.buffer.height())
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn init_color_pair(&mut self, index: u16, fg: ColorCode, bg: ColorCode) -> Result<()> {
        debug!("headless: init pair {index} ({fg:?} on {bg:?})");
        self.pairs.insert(index, (fg, bg));
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.destroyed = true;
        Ok(())
    }
}
