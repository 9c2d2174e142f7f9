//! `ColorCode`: terminal palette color numbers.

use crate::error::{Error, Result};
use std::str::FromStr;

/// A terminal color number.
///
/// `0..=7` are the eight basic ANSI colors, `8..=15` their bright
/// variants, and `16..=255` the extended 256-color cube. `-1` is the
/// terminal's own default color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorCode(pub i16);

impl ColorCode {
    /// The terminal's default color.
    pub const DEFAULT: Self = Self(-1);
    /// Black
    pub const BLACK: Self = Self(0);
    /// Red
    pub const RED: Self = Self(1);
    /// Green
    pub const GREEN: Self = Self(2);
    /// Yellow
    pub const YELLOW: Self = Self(3);
    /// Blue
    pub const BLUE: Self = Self(4);
    /// Magenta
    pub const MAGENTA: Self = Self(5);
    /// Cyan
    pub const CYAN: Self = Self(6);
    /// White
    pub const WHITE: Self = Self(7);

    /// Create a color from an ANSI index.
    #[inline]
    pub const fn indexed(index: u8) -> Self {
        Self(index as i16)
    }

    /// Check if this is the terminal default.
    #[inline]
    pub const fn is_default(self) -> bool {
        self.0 < 0
    }

    /// Get the ANSI index, or `None` for the terminal default.
    #[inline]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub const fn index(self) -> Option<u8> {
        if self.0 < 0 || self.0 > 255 {
            None
        } else {
            Some(self.0 as u8)
        }
    }

    /// Name of a basic color, if it has one.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            -1 => Some("default"),
            0 => Some("black"),
            1 => Some("red"),
            2 => Some("green"),
            3 => Some("yellow"),
            4 => Some("blue"),
            5 => Some("magenta"),
            6 => Some("cyan"),
            7 => Some("white"),
            _ => None,
        }
    }
}

impl Default for ColorCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Debug for ColorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "color{}", self.0),
        }
    }
}

impl From<u8> for ColorCode {
    #[inline]
    fn from(index: u8) -> Self {
        Self::indexed(index)
    }
}

impl FromStr for ColorCode {
    type Err = Error;

    /// Parse a color name (`red`, `default`, ...) or a number in `-1..=255`.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let code = match token.to_ascii_lowercase().as_str() {
            "default" => Self::DEFAULT,
            "black" => Self::BLACK,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "yellow" => Self::YELLOW,
            "blue" => Self::BLUE,
            "magenta" => Self::MAGENTA,
            "cyan" => Self::CYAN,
            "white" => Self::WHITE,
            other => match other.parse::<i16>() {
                Ok(n) if (-1..=255).contains(&n) => Self(n),
                _ => return Err(Error::UnknownColor(token.to_string())),
            },
        };
        Ok(code)
    }
}
