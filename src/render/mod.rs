//! Render module: the compositor.
//!
//! One frame is `clear → render_objects → present`:
//!
//! 1. Objects are stable-sorted by ascending render priority
//! 2. Each object's cell stream is replayed at each of its anchors
//! 3. Cells on the border ring are clipped unless the object may draw there;
//!    a wide glyph is clipped when either of its columns is
//! 4. Invisible glyphs leave the cell untouched
//! 5. Surviving cells have their style resolved and are written to the
//!    backend in draw order

mod drawable;
mod sprite;

pub use drawable::{CellStream, CellStyle, DrawCell, Drawable, INVISIBLE};
pub use sprite::{Label, Sprite};

use crate::backend::Backend;
use crate::color::Palette;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use log::trace;
use unicode_width::UnicodeWidthChar;

/// What one `render_objects` pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Objects drawn.
    pub objects: usize,
    /// Cells written to the backend.
    pub written: usize,
    /// Cells dropped on the border ring.
    pub clipped: usize,
    /// Invisible cells skipped.
    pub invisible: usize,
}

/// The compositor. Owns the backend and nothing else.
#[derive(Debug)]
pub struct Renderer<B: Backend> {
    backend: B,
}

impl<B: Backend> Renderer<B> {
    /// Create a renderer drawing into `backend`.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Erase the viewport and draw the border frame.
    pub fn clear(&mut self) {
        self.backend.erase();
        self.backend.draw_border();
    }

    /// Draw `objects` in priority order.
    ///
    /// # Errors
    ///
    /// Fails on the first error of a cell stream, of a written cell's style
    /// (such as an unknown pair name) or of the backend (such as an
    /// out-of-range write). Styles of clipped and invisible cells are never
    /// resolved.
    pub fn render_objects(&mut self, objects: &[&dyn Drawable], palette: &Palette) -> Result<FrameStats> {
        let (width, height) = self.backend.size();
        let interior = Rect::from_size(width, height).shrink(1);

        let mut ordered = objects.to_vec();
        ordered.sort_by_key(|object| object.render_priority());

        let mut stats = FrameStats {
            objects: ordered.len(),
            ..FrameStats::default()
        };

        for object in ordered {
            let on_border = object.draw_on_border();
            for anchor in object.anchors() {
                for cell in object.cells() {
                    let cell = cell?;
                    let pos = anchor.cell(cell.pos);

                    if !on_border && !fits(interior, pos, cell.glyph) {
                        stats.clipped += 1;
                        continue;
                    }
                    if cell.glyph == INVISIBLE {
                        stats.invisible += 1;
                        continue;
                    }

                    let style = cell.style.resolve(palette)?;
                    self.backend.write_cell(pos.x, pos.y, cell.glyph, style)?;
                    stats.written += 1;
                }
            }
        }

        trace!(
            "render: {} objects, {} written, {} clipped, {} invisible",
            stats.objects,
            stats.written,
            stats.clipped,
            stats.invisible
        );
        Ok(stats)
    }

    /// Flush the viewport to the display.
    pub fn present(&mut self) -> Result<()> {
        self.backend.refresh()
    }

    /// Viewport width, queried from the backend on every call.
    ///
    /// A [`CrosstermBackend`](crate::backend::CrosstermBackend) only
    /// measures the terminal at `erase` and `refresh`, so between frames
    /// this is the size as of the last `clear` or `present`.
    pub fn width(&self) -> u16 {
        self.backend.size().0
    }

    /// Viewport height, queried from the backend on every call.
    ///
    /// Same caveat as [`Renderer::width`].
    pub fn height(&self) -> u16 {
        self.backend.size().1
    }

    /// The backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Give the backend back.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

// Both columns of a wide glyph must be inside.
fn fits(interior: Rect, pos: Point, glyph: char) -> bool {
    interior.contains(pos)
        && (glyph.width() != Some(2) || interior.contains(Point::new(pos.x + 1, pos.y)))
}
