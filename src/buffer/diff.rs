//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! 1. Compare the front (on screen) and back (just drawn) buffers
//! 2. Emit escape sequences only for changed cells
//! 3. Skip cursor moves between adjacent cells
//! 4. Track color and attribute state to avoid redundant SGR sequences
//!
//! Styles carry a pair index; the pair table supplies its colors.

use super::{Buffer, Cell};
use crate::color::{Attr, ColorCode, Style};
use std::collections::HashMap;
use std::io::Write;

/// Colors the terminal was given for each pair index.
pub type PairTable = HashMap<u16, (ColorCode, ColorCode)>;

/// State tracker for the diffing algorithm.
///
/// This tracks the "current" terminal state (cursor position, colors,
/// attributes) to minimize the number of escape sequences emitted.
#[derive(Debug, Clone)]
pub struct DiffState {
    /// Last known cursor X position (0-indexed).
    cursor_x: u16,
    /// Last known cursor Y position (0-indexed).
    cursor_y: u16,
    /// Last emitted (fg, bg).
    colors: Option<(ColorCode, ColorCode)>,
    /// Last emitted attributes.
    attrs: Option<Attr>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            colors: None,
            attrs: None,
        }
    }

    /// Reset the state (e.g., after a full screen clear).
    pub const fn reset(&mut self) {
        self.colors = None;
        self.attrs = None;
        // Force cursor move on next write
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
    /// Number of attribute change sequences emitted.
    pub attr_changes: usize,
}

/// Render the difference between two buffers into an ANSI sequence buffer.
///
/// # Arguments
///
/// * `current` - The currently displayed buffer
/// * `next` - The buffer to transition to
/// * `pairs` - Colors of each initialized pair
/// * `output` - Buffer to write ANSI sequences to
/// * `state` - Mutable state tracking cursor/color positions
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    pairs: &PairTable,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let width = next.width();

    for y in 0..next.height() {
        for x in 0..width {
            let idx = (y as usize) * (width as usize) + (x as usize);
            let current_cell = &current.cells()[idx];
            let next_cell = &next.cells()[idx];

            if current_cell == next_cell {
                continue;
            }

            // Skip wide-character continuation cells (handled by the main cell)
            if next_cell.is_wide_continuation() {
                continue;
            }

            result.cells_changed += 1;

            if state.cursor_y != y || state.cursor_x != x {
                emit_cursor_move(output, x, y);
                state.cursor_x = x;
                state.cursor_y = y;
                result.cursor_moves += 1;
            }

            emit_style(output, next_cell.style(), pairs, state, &mut result);
            emit_glyph(output, next_cell);

            let advance = u16::from(next_cell.display_width().max(1));
            state.cursor_x = state.cursor_x.saturating_add(advance);
        }
    }

    result
}

/// Generate a full redraw sequence (no diffing).
///
/// Used for the first frame, after a resize, or whenever the terminal
/// state is unknown.
pub fn render_full(buffer: &Buffer, pairs: &PairTable, output: &mut Vec<u8>, state: &mut DiffState) {
    state.reset();
    let mut result = DiffResult::default();

    output.extend_from_slice(b"\x1b[0m\x1b[2J");

    for y in 0..buffer.height() {
        emit_cursor_move(output, 0, y);
        for x in 0..buffer.width() {
            let Some(cell) = buffer.get(x, y) else { continue };
            if cell.is_wide_continuation() {
                continue;
            }
            emit_style(output, cell.style(), pairs, state, &mut result);
            emit_glyph(output, cell);
        }
    }

    // Cursor position is unknown after writing full rows (the terminal may wrap).
    state.cursor_x = u16::MAX;
    state.cursor_y = u16::MAX;
}

/// Bring the terminal's colors and attributes in line with `style`.
fn emit_style(
    output: &mut Vec<u8>,
    style: Style,
    pairs: &PairTable,
    state: &mut DiffState,
    result: &mut DiffResult,
) {
    // Removing an attribute needs a full reset, which also clears colors.
    let current_attrs = state.attrs.unwrap_or(Attr::NORMAL);
    if !current_attrs.difference(style.attrs).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.colors = None;
        state.attrs = None;
    }

    let colors = pair_colors(pairs, style.pair);
    if state.colors != Some(colors) {
        emit_fg_color(output, colors.0);
        emit_bg_color(output, colors.1);
        state.colors = Some(colors);
        result.color_changes += 1;
    }

    if state.attrs != Some(style.attrs) {
        let added = style.attrs.difference(state.attrs.unwrap_or(Attr::NORMAL));
        emit_attr_set(output, added);
        state.attrs = Some(style.attrs);
        result.attr_changes += 1;
    }
}

/// Colors of a pair; pair 0 and unknown pairs use the terminal defaults.
fn pair_colors(pairs: &PairTable, pair: u16) -> (ColorCode, ColorCode) {
    pairs
        .get(&pair)
        .copied()
        .unwrap_or((ColorCode::DEFAULT, ColorCode::DEFAULT))
}

/// Emit a cursor move sequence.
///
/// Uses the most compact representation:
/// - `\x1b[H` for home (1,1)
/// - `\x1b[{row}H` for column 1
/// - `\x1b[{row};{col}H` otherwise
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    // ANSI uses 1-indexed positions
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

/// Emit a foreground color sequence.
#[inline]
fn emit_fg_color(output: &mut Vec<u8>, color: ColorCode) {
    let _ = match color.index() {
        None => write!(output, "\x1b[39m"),
        Some(n @ 0..=7) => write!(output, "\x1b[{}m", 30 + u16::from(n)),
        Some(n @ 8..=15) => write!(output, "\x1b[{}m", 90 + u16::from(n - 8)),
        Some(n) => write!(output, "\x1b[38;5;{n}m"),
    };
}

/// Emit a background color sequence.
#[inline]
fn emit_bg_color(output: &mut Vec<u8>, color: ColorCode) {
    let _ = match color.index() {
        None => write!(output, "\x1b[49m"),
        Some(n @ 0..=7) => write!(output, "\x1b[{}m", 40 + u16::from(n)),
        Some(n @ 8..=15) => write!(output, "\x1b[{}m", 100 + u16::from(n - 8)),
        Some(n) => write!(output, "\x1b[48;5;{n}m"),
    };
}

/// Emit SGR sequences for a set of attributes.
fn emit_attr_set(output: &mut Vec<u8>, attrs: Attr) {
    if attrs.contains(Attr::BOLD) {
        output.extend_from_slice(b"\x1b[1m");
    }
    if attrs.contains(Attr::DIM) {
        output.extend_from_slice(b"\x1b[2m");
    }
    if attrs.contains(Attr::ITALIC) {
        output.extend_from_slice(b"\x1b[3m");
    }
    if attrs.contains(Attr::UNDERLINE) {
        output.extend_from_slice(b"\x1b[4m");
    }
    if attrs.contains(Attr::BLINK) {
        output.extend_from_slice(b"\x1b[5m");
    }
    if attrs.intersects(Attr::REVERSE | Attr::STANDOUT) {
        output.extend_from_slice(b"\x1b[7m");
    }
    if attrs.contains(Attr::INVISIBLE) {
        output.extend_from_slice(b"\x1b[8m");
    }
}

/// Emit a glyph to the output buffer.
#[inline]
fn emit_glyph(output: &mut Vec<u8>, cell: &Cell) {
    let mut bytes = [0u8; 4];
    output.extend_from_slice(cell.glyph().encode_utf8(&mut bytes).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> PairTable {
        let mut pairs = PairTable::new();
        pairs.insert(1, (ColorCode::RED, ColorCode::BLACK));
        pairs
    }

    #[test]
    fn test_diff_identical_buffers() {
        let a = Buffer::new(10, 5);
        let b = Buffer::new(10, 5);
        let mut output = Vec::new();
        let mut state = DiffState::new();

        let result = render_diff(&a, &b, &pairs(), &mut output, &mut state);

        assert_eq!(result.cells_changed, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_diff_single_cell_change() {
        let a = Buffer::new(10, 5);
        let mut b = Buffer::new(10, 5);
        b.set(5, 2, Cell::new('X'));

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &pairs(), &mut output, &mut state);

        assert_eq!(result.cells_changed, 1);
        assert_eq!(result.cursor_moves, 1);
        let output_str = String::from_utf8_lossy(&output);
        assert!(output_str.contains("\x1b[3;6H"));
        assert!(output_str.ends_with('X'));
    }

    #[test]
    fn test_diff_adjacent_cells_no_cursor_move() {
        let a = Buffer::new(10, 5);
        let mut b = Buffer::new(10, 5);
        b.set(0, 0, Cell::new('A'));
        b.set(1, 0, Cell::new('B'));
        b.set(2, 0, Cell::new('C'));

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &pairs(), &mut output, &mut state);

        assert_eq!(result.cells_changed, 3);
        // cursor starts at (0,0) and cells are adjacent
        assert_eq!(result.cursor_moves, 0);
    }

    #[test]
    fn test_diff_color_tracking() {
        let a = Buffer::new(10, 5);
        let mut b = Buffer::new(10, 5);
        b.set(0, 0, Cell::new('A').with_style(Style::for_pair(1)));
        b.set(1, 0, Cell::new('B').with_style(Style::for_pair(1)));

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &pairs(), &mut output, &mut state);

        assert_eq!(result.color_changes, 1);
        let output_str = String::from_utf8_lossy(&output);
        assert!(output_str.contains("\x1b[31m\x1b[40m"));
    }

    #[test]
    fn test_diff_attr_removal_resets() {
        let a = Buffer::new(10, 1);
        let mut b = Buffer::new(10, 1);
        b.set(0, 0, Cell::new('A').with_style(Style::DEFAULT | Attr::BOLD));
        b.set(1, 0, Cell::new('B'));

        let mut output = Vec::new();
        let mut state = DiffState::new();
        render_diff(&a, &b, &pairs(), &mut output, &mut state);

        let output_str = String::from_utf8_lossy(&output);
        let bold = output_str.find("\x1b[1m").unwrap();
        let reset = output_str.rfind("\x1b[0m").unwrap();
        assert!(bold < reset);
    }

    #[test]
    fn test_extended_colors() {
        let mut output = Vec::new();
        emit_fg_color(&mut output, ColorCode(9));
        emit_bg_color(&mut output, ColorCode(200));
        emit_fg_color(&mut output, ColorCode::DEFAULT);
        assert_eq!(output, b"\x1b[91m\x1b[48;5;200m\x1b[39m");
    }

    #[test]
    fn test_cursor_move_optimization() {
        let mut output = Vec::new();

        emit_cursor_move(&mut output, 0, 0);
        assert_eq!(&output, b"\x1b[H");

        output.clear();
        emit_cursor_move(&mut output, 0, 5);
        assert_eq!(&output, b"\x1b[6H");

        output.clear();
        emit_cursor_move(&mut output, 10, 5);
        assert_eq!(&output, b"\x1b[6;11H");
    }

    #[test]
    fn test_render_full() {
        let mut buffer = Buffer::new(3, 2);
        buffer.set(0, 0, Cell::new('A'));
        buffer.set(1, 0, Cell::new('B'));
        buffer.set(2, 0, Cell::new('C'));

        let mut output = Vec::new();
        let mut state = DiffState::new();
        render_full(&buffer, &pairs(), &mut output, &mut state);

        let output_str = String::from_utf8_lossy(&output);
        assert!(output_str.starts_with("\x1b[0m\x1b[2J\x1b[H"));
        assert!(output_str.contains("ABC"));
        assert!(output_str.contains("\x1b[2H"));
    }
}
