//! Error types for xo1.
//!
//! Everything that can go wrong is raised synchronously at the offending
//! call. Nothing is retried.

use thiserror::Error;

/// Result type alias for xo1 operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for xo1 operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A surface's layers have an invalid shape.
    #[error("Surface '{name}' malformed: {reason}.")]
    MalformedSurface {
        /// Surface (or file) name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A pair with this name is already registered.
    #[error("Pair with name = {0} already registered. You can use force=true to redefine it.")]
    DuplicateName(String),

    /// A pair with this index is already registered.
    #[error("Pair with idx = {0} already registered. You can use force=true to redefine it.")]
    DuplicateIndex(u16),

    /// The highest pair index is taken, so `register` has no next index.
    #[error("palette full: pair index {} is already in use", u16::MAX)]
    PaletteFull,

    /// A shorthand palette entry has an unsupported number of fields.
    #[error("palette entry must have 1 to 3 fields (name, fg, bg), got {arity}")]
    InvalidPaletteEntry {
        /// Number of fields found.
        arity: usize,
    },

    /// A color name was never registered in the palette.
    #[error("unknown color pair name: {0}")]
    UnknownName(String),

    /// A color token is neither a known color name nor a number.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// A write landed outside the addressable viewport.
    #[error("position ({x}, {y}) out of bounds for {width}x{height} viewport")]
    OutOfBounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Viewport width.
        width: u16,
        /// Viewport height.
        height: u16,
    },

    /// I/O error from terminal or file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML document could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A TOML document could not be written.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Shorthand for [`Error::MalformedSurface`].
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSurface {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
