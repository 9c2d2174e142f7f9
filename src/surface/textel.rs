//! Textel: TExt teXTure ELement, one cell of a surface.

use crate::color::{AttrToken, Palette, Style, DEFAULT_PAIR_NAME};
use crate::error::Result;
use crate::geometry::Point;

/// A single character cell with symbolic color and attributes.
///
/// The style is not stored. It is computed by [`Textel::style`] against
/// whichever palette the caller passes, so one surface can be drawn under
/// several palettes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Textel {
    /// The character to display.
    pub glyph: char,
    /// Palette pair name; `None` means the palette default.
    pub color: Option<String>,
    /// Attribute tokens, OR-ed together at resolve time.
    pub attrs: Option<Vec<AttrToken>>,
    /// Position inside the surface, stamped during iteration.
    pub pos: Option<Point>,
}

impl Textel {
    /// Create a textel without a position.
    pub fn new(glyph: char, color: Option<String>, attrs: Option<Vec<AttrToken>>) -> Self {
        Self {
            glyph,
            color,
            attrs,
            pos: None,
        }
    }

    /// Set the position (builder pattern).
    #[inline]
    #[must_use]
    pub fn at(mut self, pos: Point) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Compute the style of this textel under `palette`.
    ///
    /// Fails with [`crate::Error::UnknownName`] if the color is not in the
    /// palette. Unknown attribute names degrade to no attribute.
    pub fn style(&self, palette: &Palette) -> Result<Style> {
        let mut style = palette.resolve(self.color.as_deref().unwrap_or(DEFAULT_PAIR_NAME))?;

        for token in self.attrs.iter().flatten() {
            style |= palette.decode_attribute(token);
        }

        Ok(style)
    }
}
