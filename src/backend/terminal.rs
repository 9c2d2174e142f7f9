//! Crossterm backend: a double-buffered real terminal.
//!
//! Writes land in a back buffer. `refresh` diffs it against the front
//! buffer (what the terminal shows) and flushes the escape sequences in
//! one `write_all`. The attached terminal is measured at every erase and
//! refresh; a size change forces a full repaint.

use super::{draw_border_into, write_to_buffer, Backend};
use crate::buffer::diff::{render_diff, render_full, DiffState, PairTable};
use crate::buffer::Buffer;
use crate::color::{ColorCode, Style};
use crate::error::Result;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, trace, warn};
use serde::Deserialize;
use std::io::{self, Stdout, Write};

/// How the real terminal is set up while the backend owns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Whether to hide the cursor.
    pub hide_cursor: bool,
    /// Whether to switch to raw mode.
    pub raw_mode: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            hide_cursor: true,
            raw_mode: true,
        }
    }
}

/// A [`Backend`] that emits ANSI sequences to any writer.
pub struct CrosstermBackend<W: Write> {
    /// Output sink.
    writer: W,
    /// What the terminal currently shows.
    front: Buffer,
    /// What is being drawn.
    back: Buffer,
    /// Initialized pairs.
    pairs: PairTable,
    /// Cursor and color tracking for the diff.
    diff_state: DiffState,
    /// Pre-allocated escape sequence buffer.
    output: Vec<u8>,
    /// Whether the next refresh repaints everything.
    needs_full_redraw: bool,
    /// Whether the terminal can show colors.
    color: bool,
    /// Terminal setup; `None` for a fixed-size writer.
    config: Option<TerminalConfig>,
    /// Set once the terminal was handed back.
    restored: bool,
}

impl CrosstermBackend<Stdout> {
    /// Take over the process terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried or set up.
    pub fn stdout(config: TerminalConfig) -> Result<Self> {
        let (width, height) = terminal::size()?;

        if config.raw_mode {
            terminal::enable_raw_mode()?;
        }

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if config.hide_cursor {
            execute!(stdout, cursor::Hide)?;
        }

        let color = crossterm::style::available_color_count() >= 8;
        info!("terminal: attached {width}x{height}, color={color}");

        let mut backend = Self::new(stdout, width, height).with_color_support(color);
        backend.config = Some(config);
        Ok(backend)
    }
}

impl<W: Write> CrosstermBackend<W> {
    /// Create a fixed-size backend writing to `writer`.
    pub fn new(writer: W, width: u16, height: u16) -> Self {
        Self {
            writer,
            front: Buffer::new(width, height),
            back: Buffer::new(width, height),
            pairs: PairTable::new(),
            diff_state: DiffState::new(),
            output: Vec::with_capacity(65536),
            needs_full_redraw: true,
            color: true,
            config: None,
            restored: false,
        }
    }

    /// Set whether the backend reports color support (builder pattern).
    #[must_use]
    pub const fn with_color_support(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The output sink.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// What the terminal shows after the last refresh.
    pub const fn front(&self) -> &Buffer {
        &self.front
    }

    /// Resize both buffers and schedule a full repaint.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.back.width(), self.back.height()) {
            return;
        }
        debug!("terminal: resized to {width}x{height}");
        self.front.resize(width, height);
        self.back.resize(width, height);
        self.needs_full_redraw = true;
    }

    /// Pick up a size change of the attached terminal.
    fn sync_size(&mut self) {
        if self.config.is_none() || self.restored {
            return;
        }
        if let Ok((width, height)) = terminal::size() {
            self.resize(width, height);
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let Some(config) = self.config.clone() else {
            return self.writer.flush();
        };
        info!("terminal: restoring");
        if config.hide_cursor {
            execute!(self.writer, cursor::Show)?;
        }
        if config.alternate_screen {
            execute!(self.writer, LeaveAlternateScreen)?;
        }
        if config.raw_mode {
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }
}

impl<W: Write> Backend for CrosstermBackend<W> {
    fn erase(&mut self) {
        self.sync_size();
        self.back.clear();
    }

    fn draw_border(&mut self) {
        draw_border_into(&mut self.back, Style::DEFAULT);
    }

    fn write_cell(&mut self, x: i32, y: i32, glyph: char, style: Option<Style>) -> Result<()> {
        write_to_buffer(&mut self.back, x, y, glyph, style.unwrap_or_default())
    }

    fn refresh(&mut self) -> Result<()> {
        self.sync_size();
        self.output.clear();

        if self.needs_full_redraw {
            render_full(&self.back, &self.pairs, &mut self.output, &mut self.diff_state);
            self.needs_full_redraw = false;
        } else {
            let result = render_diff(
                &self.front,
                &self.back,
                &self.pairs,
                &mut self.output,
                &mut self.diff_state,
            );
            trace!(
                "terminal: {} cells changed, {} cursor moves",
                result.cells_changed,
                result.cursor_moves
            );
        }

        if !self.output.is_empty() {
            self.writer.write_all(&self.output)?;
        }
        self.writer.flush()?;
        self.front.copy_from(&self.back);
        Ok(())
    }

    // Size of the attached terminal as of the last erase or refresh.
    fn size(&self) -> (u16, u16) {
        (self.back.width(), self.back.height())
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn init_color_pair(&mut self, index: u16, fg: ColorCode, bg: ColorCode) -> Result<()> {
        debug!("terminal: init pair {index} ({fg:?} on {bg:?})");
        if self.pairs.insert(index, (fg, bg)).is_some() {
            // Cells already on screen may use the old colors.
            self.needs_full_redraw = true;
        }
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.restore()?;
        Ok(())
    }
}

impl<W: Write> Drop for CrosstermBackend<W> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("terminal: restore failed: {err}");
        }
    }
}

impl<W: Write> std::fmt::Debug for CrosstermBackend<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrosstermBackend")
            .field("width", &self.back.width())
            .field("height", &self.back.height())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
