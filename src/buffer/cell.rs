//! Cell: The atomic unit of a viewport.

use crate::color::Style;
use bitflags::bitflags;

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// This cell is a continuation of a wide character
        const WIDE_CONTINUATION = 0b0000_0001;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single viewport cell: one glyph and its resolved style.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    glyph: char,
    /// Display width of the glyph (0=continuation, 1=normal, 2=wide CJK).
    width: u8,
    style: Style,
    flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space with default style).
    pub const EMPTY: Self = Self {
        glyph: ' ',
        width: 1,
        style: Style::DEFAULT,
        flags: CellFlags::empty(),
    };

    /// Create a cell from any character.
    #[inline]
    pub fn new(glyph: char) -> Self {
        let width = unicode_width::UnicodeWidthChar::width(glyph).unwrap_or(0);
        Self {
            glyph,
            width: u8::try_from(width).unwrap_or(1),
            style: Style::DEFAULT,
            flags: CellFlags::empty(),
        }
    }

    /// Create a wide-character continuation cell.
    ///
    /// This is placed after a wide CJK character that takes 2 columns.
    #[inline]
    pub const fn wide_continuation(style: Style) -> Self {
        Self {
            glyph: ' ',
            width: 0,
            style,
            flags: CellFlags::WIDE_CONTINUATION,
        }
    }

    /// Get the glyph.
    #[inline]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    /// Get the display width (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.width
    }

    /// Get the style.
    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Set the style (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Reset the cell to empty.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("glyph", &self.glyph)
            .field("width", &self.width)
            .field("style", &self.style)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Attr;

    #[test]
    fn test_cell_new_ascii() {
        let cell = Cell::new('A');
        assert_eq!(cell.glyph(), 'A');
        assert_eq!(cell.display_width(), 1);
        assert_eq!(cell.style(), Style::DEFAULT);
    }

    #[test]
    fn test_cell_wide() {
        let cell = Cell::new('日');
        assert_eq!(cell.display_width(), 2);
    }

    #[test]
    fn test_cell_with_style() {
        let style = Style::for_pair(3) | Attr::BOLD;
        let cell = Cell::new('X').with_style(style);
        assert_eq!(cell.style(), style);
        assert_ne!(cell, Cell::new('X'));
    }

    #[test]
    fn test_cell_reset() {
        let mut cell = Cell::new('X').with_style(Style::for_pair(1));
        cell.reset();
        assert_eq!(cell, Cell::EMPTY);
    }

    #[test]
    fn test_wide_continuation() {
        let cont = Cell::wide_continuation(Style::DEFAULT);
        assert!(cont.is_wide_continuation());
        assert_eq!(cont.display_width(), 0);
    }
}
