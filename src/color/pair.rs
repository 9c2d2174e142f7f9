//! `ColorPair`: one registered (index, foreground, background) slot.

use super::{Attr, ColorCode, Style};
use crate::backend::Backend;
use crate::error::Result;

/// A color pair as the terminal sees it.
///
/// The index is the slot the palette assigned; it is what ends up in
/// [`Style::pair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    /// Pair slot (1-based; 0 is reserved for the terminal default).
    pub index: u16,
    /// Foreground color.
    pub fg: ColorCode,
    /// Background color.
    pub bg: ColorCode,
    /// Attributes always applied with this pair.
    pub attrs: Option<Attr>,
}

impl ColorPair {
    /// Create a new color pair.
    #[inline]
    pub const fn new(index: u16, fg: ColorCode, bg: ColorCode) -> Self {
        Self {
            index,
            fg,
            bg,
            attrs: None,
        }
    }

    /// Set the attributes (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// The style this pair resolves to.
    #[inline]
    pub fn style(&self) -> Style {
        Style::for_pair(self.index) | self.attrs.unwrap_or_default()
    }

    /// Push this pair to the backend.
    ///
    /// Does nothing if the terminal doesn't support colors.
    pub fn init<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<()> {
        if !backend.supports_color() {
            return Ok(());
        }
        backend.init_color_pair(self.index, self.fg, self.bg)
    }
}
