//! Style values: what a backend needs to paint one cell.

use bitflags::bitflags;
use std::ops::{BitOr, BitOrAssign};

bitflags! {
    /// Text attributes.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use xo1::Attr;
    /// let attr = Attr::BOLD | Attr::UNDERLINE;
    /// assert!(attr.contains(Attr::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u16 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Reversed colors (fg/bg swapped)
        const REVERSE = 0b0010_0000;
        /// Hidden/invisible text
        const INVISIBLE = 0b0100_0000;
        /// Best highlighting mode of the terminal
        const STANDOUT = 0b1000_0000;
    }
}

impl Attr {
    /// No attributes.
    pub const NORMAL: Self = Self::empty();
}

impl std::fmt::Debug for Attr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "NORMAL");
        }
        bitflags::parser::to_writer(self, f)
    }
}

/// The resolved style of a cell: a color pair slot plus attributes.
///
/// Pair `0` means "no explicit pair", i.e. the terminal's default
/// colors. Backends map a pair index to the colors they were given in
/// [`crate::Backend::init_color_pair`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Color pair index (0 = default colors).
    pub pair: u16,
    /// Attribute bits.
    pub attrs: Attr,
}

impl Style {
    /// Default colors, no attributes.
    pub const DEFAULT: Self = Self {
        pair: 0,
        attrs: Attr::NORMAL,
    };

    /// The style for a color pair index.
    #[inline]
    pub const fn for_pair(pair: u16) -> Self {
        Self {
            pair,
            attrs: Attr::NORMAL,
        }
    }

    /// Set the attributes (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    /// Pack into a raw integer: pair in the high half, attributes low.
    #[inline]
    pub const fn bits(self) -> u32 {
        ((self.pair as u32) << 16) | self.attrs.bits() as u32
    }

    /// Unpack a raw integer produced by [`Style::bits`].
    ///
    /// Unknown attribute bits are dropped.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            pair: (bits >> 16) as u16,
            attrs: Attr::from_bits_truncate(bits as u16),
        }
    }
}

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Style(pair {}, {:?})", self.pair, self.attrs)
    }
}

impl BitOr<Attr> for Style {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Attr) -> Self {
        Self {
            pair: self.pair,
            attrs: self.attrs | rhs,
        }
    }
}

impl BitOrAssign<Attr> for Style {
    #[inline]
    fn bitor_assign(&mut self, rhs: Attr) {
        self.attrs |= rhs;
    }
}
