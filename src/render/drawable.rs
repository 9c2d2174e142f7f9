//! The contract between renderable objects and the compositor.

use crate::color::{AttrToken, Palette, Style, DEFAULT_PAIR_NAME};
use crate::error::Result;
use crate::geometry::{Point, Vec2};

/// Glyph that marks a cell as "leave untouched".
pub const INVISIBLE: char = ' ';

/// The style of a draw cell.
///
/// Named styles are resolved against the palette only when the cell is
/// actually written, so clipped and invisible cells never look up their
/// color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CellStyle {
    /// The backend default.
    #[default]
    Plain,
    /// An already resolved style.
    Fixed(Style),
    /// A pair name (`None` for the palette default) and attribute tokens.
    Named {
        /// Pair name.
        color: Option<String>,
        /// Attribute tokens, OR-ed together.
        attrs: Vec<AttrToken>,
    },
}

impl CellStyle {
    /// Resolve against `palette`. `None` means the backend default.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::Error::UnknownName`] for an unregistered pair name.
    pub fn resolve(&self, palette: &Palette) -> Result<Option<Style>> {
        match self {
            Self::Plain => Ok(None),
            Self::Fixed(style) => Ok(Some(*style)),
            Self::Named { color, attrs } => {
                let mut style = palette.resolve(color.as_deref().unwrap_or(DEFAULT_PAIR_NAME))?;
                for token in attrs {
                    style |= palette.decode_attribute(token);
                }
                Ok(Some(style))
            }
        }
    }
}

impl From<Style> for CellStyle {
    fn from(style: Style) -> Self {
        Self::Fixed(style)
    }
}

/// One cell a drawable wants written, relative to its anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCell {
    /// Position relative to the anchor.
    pub pos: Point,
    /// Glyph to write.
    pub glyph: char,
    /// Style, resolved by the compositor.
    pub style: CellStyle,
}

impl DrawCell {
    /// Create a draw cell.
    #[inline]
    pub const fn new(pos: Point, glyph: char, style: CellStyle) -> Self {
        Self { pos, glyph, style }
    }
}

/// A lazily produced stream of draw cells.
pub type CellStream<'a> = Box<dyn Iterator<Item = Result<DrawCell>> + 'a>;

/// Something the [`Renderer`](super::Renderer) can draw.
///
/// `cells` is called once per anchor and must start a fresh pass every
/// time it is called.
pub trait Drawable {
    /// Draw order. Lower priorities are drawn first, so higher ones win
    /// overlapping cells.
    fn render_priority(&self) -> i32;

    /// Whether the object may draw on the border ring.
    fn draw_on_border(&self) -> bool {
        false
    }

    /// Where the object is drawn. The cell stream is replayed at each anchor.
    fn anchors(&self) -> Vec<Vec2>;

    /// The cells to draw.
    fn cells(&self) -> CellStream<'_>;
}

impl<T: Drawable + ?Sized> Drawable for &T {
    fn render_priority(&self) -> i32 {
        (**self).render_priority()
    }

    fn draw_on_border(&self) -> bool {
        (**self).draw_on_border()
    }

    fn anchors(&self) -> Vec<Vec2> {
        (**self).anchors()
    }

    fn cells(&self) -> CellStream<'_> {
        (**self).cells()
    }
}

impl<T: Drawable + ?Sized> Drawable for Box<T> {
    fn render_priority(&self) -> i32 {
        (**self).render_priority()
    }

    fn draw_on_border(&self) -> bool {
        (**self).draw_on_border()
    }

    fn anchors(&self) -> Vec<Vec2> {
        (**self).anchors()
    }

    fn cells(&self) -> CellStream<'_> {
        (**self).cells()
    }
}
