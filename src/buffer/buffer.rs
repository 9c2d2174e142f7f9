//! Buffer: A grid of cells backing a viewport.
//!
//! Cells are stored in row-major order in one contiguous `Vec`.

use super::cell::Cell;
use crate::color::Style;

/// A grid of cells.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to empty (space with default style).
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Set a glyph at (x, y).
    ///
    /// For wide characters (CJK), this also sets a continuation cell
    /// at (x+1, y).
    ///
    /// Returns the display width of the glyph, or 0 if out of bounds.
    pub fn set_glyph(&mut self, x: u16, y: u16, glyph: char, style: Style) -> u8 {
        let cell = Cell::new(glyph).with_style(style);
        if !self.set(x, y, cell) {
            return 0;
        }

        let width = cell.display_width();
        if width == 2 {
            self.set(x.saturating_add(1), y, Cell::wide_continuation(style));
        }
        width
    }

    /// Get the glyph at (x, y).
    ///
    /// Returns `None` if out of bounds or if it's a continuation cell.
    pub fn glyph(&self, x: u16, y: u16) -> Option<char> {
        self.get(x, y)
            .filter(|cell| !cell.is_wide_continuation())
            .map(Cell::glyph)
    }

    /// The text of row `y`, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        (0..self.width).filter_map(|x| self.glyph(x, y)).collect()
    }

    /// Clear the entire buffer (fill with empty cells).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize the buffer, preserving content where possible.
    ///
    /// New cells are initialized to empty.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let new_size = (new_width as usize) * (new_height as usize);
        let mut new_cells = vec![Cell::EMPTY; new_size];

        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;

        for y in 0..copy_height {
            let old_start = y * (self.width as usize);
            let new_start = y * (new_width as usize);
            new_cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = new_cells;
        self.width = new_width;
        self.height = new_height;
    }

    /// Copy content from another buffer of the same dimensions.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.len(), 80 * 24);
        assert!(Buffer::new(0, 0).is_empty());
    }

    #[test]
    fn test_buffer_get_set() {
        let mut buffer = Buffer::new(80, 24);
        assert!(buffer.set(5, 10, Cell::new('X')));
        assert_eq!(buffer.glyph(5, 10), Some('X'));
        assert!(!buffer.set(80, 10, Cell::new('X')));
    }

    #[test]
    fn test_buffer_bounds() {
        let buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(buffer.get(79, 24).is_none());
    }

    #[test]
    fn test_buffer_set_glyph() {
        let mut buffer = Buffer::new(10, 2);

        assert_eq!(buffer.set_glyph(0, 0, 'A', Style::DEFAULT), 1);
        assert_eq!(buffer.glyph(0, 0), Some('A'));

        assert_eq!(buffer.set_glyph(5, 0, '日', Style::for_pair(1)), 2);
        assert_eq!(buffer.glyph(5, 0), Some('日'));
        assert!(buffer.get(6, 0).unwrap().is_wide_continuation());
        assert_eq!(buffer.glyph(6, 0), None);

        assert_eq!(buffer.set_glyph(10, 0, 'A', Style::DEFAULT), 0);
    }

    #[test]
    fn test_buffer_row_text() {
        let mut buffer = Buffer::new(5, 2);
        buffer.set_glyph(1, 1, 'h', Style::DEFAULT);
        buffer.set_glyph(2, 1, 'i', Style::DEFAULT);
        assert_eq!(buffer.row_text(1), " hi  ");
        assert_eq!(buffer.row_text(7), "");
    }

    #[test]
    fn test_buffer_clear() {
        let mut buffer = Buffer::new(80, 24);
        buffer.set(5, 5, Cell::new('X'));
        buffer.clear();
        assert_eq!(buffer.get(5, 5), Some(&Cell::EMPTY));
    }

    #[test]
    fn test_buffer_resize() {
        let mut buffer = Buffer::new(80, 24);
        buffer.set(5, 5, Cell::new('X'));

        buffer.resize(100, 30);
        assert_eq!(buffer.width(), 100);
        assert_eq!(buffer.height(), 30);
        assert_eq!(buffer.glyph(5, 5), Some('X'));

        buffer.resize(10, 10);
        assert_eq!(buffer.glyph(5, 5), Some('X'));
        assert!(buffer.get(15, 15).is_none());
    }
}
