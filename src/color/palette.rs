//! Palette: the registry of named color pairs and attribute names.
//!
//! A palette maps symbolic names to [`ColorPair`]s and attribute names to
//! [`Attr`] bits. Surfaces only ever refer to colors by name, so the same
//! surface renders differently under a different palette.
//!
//! ```
//! use xo1::{ColorCode, Palette};
//!
//! let palette = Palette::with_entries([
//!     ("normal", ColorCode::WHITE, ColorCode::BLACK),
//!     ("error", ColorCode::RED, ColorCode::BLACK),
//! ])
//! .unwrap();
//!
//! assert_eq!(palette.pair_names(), vec!["normal", "error"]);
//! ```

use super::{Attr, ColorCode, ColorPair, Style};
use crate::backend::Backend;
use crate::error::{Error, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved pair name that resolves to the terminal default colors.
pub const DEFAULT_PAIR_NAME: &str = "default";

/// One initial palette entry: name, foreground, background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Pair name.
    pub name: String,
    /// Foreground color.
    pub fg: ColorCode,
    /// Background color.
    pub bg: ColorCode,
}

impl PaletteEntry {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, fg: ColorCode, bg: ColorCode) -> Self {
        Self {
            name: name.into(),
            fg,
            bg,
        }
    }

    /// Build an entry from `[name, fg?, bg?]` tokens.
    ///
    /// Missing colors default to [`ColorCode::DEFAULT`]. Any other number
    /// of fields fails with [`Error::InvalidPaletteEntry`].
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Result<Self> {
        let color = |i: usize| -> Result<ColorCode> {
            parts
                .get(i)
                .map_or(Ok(ColorCode::DEFAULT), |s| s.as_ref().parse())
        };

        match parts {
            [name, ..] if parts.len() <= 3 => Ok(Self::new(name.as_ref(), color(1)?, color(2)?)),
            _ => Err(Error::InvalidPaletteEntry { arity: parts.len() }),
        }
    }
}

impl<S: Into<String>> From<(S, ColorCode, ColorCode)> for PaletteEntry {
    fn from((name, fg, bg): (S, ColorCode, ColorCode)) -> Self {
        Self::new(name, fg, bg)
    }
}

impl<S: Into<String>> From<(S, ColorCode)> for PaletteEntry {
    fn from((name, fg): (S, ColorCode)) -> Self {
        Self::new(name, fg, ColorCode::DEFAULT)
    }
}

impl<S: Into<String>> From<(S,)> for PaletteEntry {
    fn from((name,): (S,)) -> Self {
        Self::new(name, ColorCode::DEFAULT, ColorCode::DEFAULT)
    }
}

/// What [`Palette::resolve`] accepts: a pair name or an already resolved style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKey<'a> {
    /// A registered pair name (or `"default"`).
    Name(&'a str),
    /// A style the caller already holds; returned unchanged.
    Raw(Style),
}

impl<'a> From<&'a str> for ColorKey<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for ColorKey<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl From<Style> for ColorKey<'_> {
    fn from(style: Style) -> Self {
        Self::Raw(style)
    }
}

impl From<u32> for ColorKey<'_> {
    fn from(bits: u32) -> Self {
        Self::Raw(Style::from_bits(bits))
    }
}

/// One attribute token: a symbolic name or raw attribute bits.
///
/// In TOML this is either a string (`"bold"`) or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrToken {
    /// Raw attribute bits, passed through unchanged.
    Raw(u16),
    /// Symbolic attribute name, looked up in the palette.
    Name(String),
}

impl From<&str> for AttrToken {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for AttrToken {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Attr> for AttrToken {
    fn from(attr: Attr) -> Self {
        Self::Raw(attr.bits())
    }
}

/// Registry of color pairs and attribute names.
///
/// Mutate it during setup; rendering only reads it.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Pair name -> pair.
    pairs: HashMap<String, ColorPair>,
    /// Attribute name -> bits.
    attributes: HashMap<String, Attr>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// Create an empty palette with the built-in attribute names.
    pub fn new() -> Self {
        let attributes = [
            ("normal", Attr::NORMAL),
            ("bold", Attr::BOLD),
            ("dim", Attr::DIM),
            ("italic", Attr::ITALIC),
            ("underline", Attr::UNDERLINE),
            ("blink", Attr::BLINK),
            ("reverse", Attr::REVERSE),
            ("invisible", Attr::INVISIBLE),
            ("standout", Attr::STANDOUT),
        ]
        .into_iter()
        .map(|(name, attr)| (name.to_string(), attr))
        .collect();

        Self {
            pairs: HashMap::new(),
            attributes,
        }
    }

    /// Create a palette from an ordered list of entries.
    ///
    /// Indices are assigned sequentially starting at 1. Pairs are not
    /// pushed to any backend; call [`Palette::initialize_all`] for that.
    pub fn with_entries<I, E>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<PaletteEntry>,
    {
        let mut palette = Self::new();
        for (position, entry) in entries.into_iter().map(Into::<PaletteEntry>::into).enumerate() {
            let index = u16::try_from(position + 1).map_err(|_| Error::PaletteFull)?;
            palette.add_pair(entry.name, ColorPair::new(index, entry.fg, entry.bg), false)?;
        }
        Ok(palette)
    }

    /// Add a pair with an explicit index.
    ///
    /// Without `force`, fails if the name or the index is already taken.
    /// With `force`, the name is overwritten and index collisions are
    /// allowed.
    pub fn add_pair(&mut self, name: impl Into<String>, pair: ColorPair, force: bool) -> Result<()> {
        let name = name.into();

        if !force {
            if self.pairs.contains_key(&name) {
                return Err(Error::DuplicateName(name));
            }
            if self.pairs.values().any(|p| p.index == pair.index) {
                return Err(Error::DuplicateIndex(pair.index));
            }
        }

        debug!("palette: pair '{name}' -> {} ({:?} on {:?})", pair.index, pair.fg, pair.bg);
        self.pairs.insert(name, pair);
        Ok(())
    }

    /// Register a pair under the next free index (highest index + 1).
    ///
    /// Returns the registered pair. Call [`ColorPair::init`] on it to push
    /// it to a backend right away. Fails with [`Error::PaletteFull`] once
    /// index `u16::MAX` is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        fg: ColorCode,
        bg: ColorCode,
        attrs: Option<Attr>,
        force: bool,
    ) -> Result<ColorPair> {
        let index = self.next_index().ok_or(Error::PaletteFull)?;
        let pair = ColorPair {
            index,
            fg,
            bg,
            attrs,
        };
        self.add_pair(name, pair, force)?;
        Ok(pair)
    }

    /// Push every pair to the backend, in index order.
    ///
    /// Safe to call repeatedly. Does nothing on a backend without color.
    pub fn initialize_all<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<()> {
        if !backend.supports_color() {
            debug!("palette: backend has no color support, skipping {} pairs", self.len());
            return Ok(());
        }

        let mut pairs: Vec<&ColorPair> = self.pairs.values().collect();
        pairs.sort_by_key(|p| p.index);
        for pair in pairs {
            pair.init(backend)?;
        }
        Ok(())
    }

    /// Resolve a pair name (or raw style) to a style.
    ///
    /// `"default"` resolves to pair 0 even though it is never registered.
    pub fn resolve<'a>(&self, key: impl Into<ColorKey<'a>>) -> Result<Style> {
        match key.into() {
            ColorKey::Raw(style) => Ok(style),
            ColorKey::Name(DEFAULT_PAIR_NAME) => Ok(Style::DEFAULT),
            ColorKey::Name(name) => self
                .pairs
                .get(name)
                .map(ColorPair::style)
                .ok_or_else(|| Error::UnknownName(name.to_string())),
        }
    }

    /// Decode an attribute token, falling back to [`Attr::NORMAL`].
    pub fn decode_attribute(&self, token: &AttrToken) -> Attr {
        self.decode_attribute_or(token, Attr::NORMAL)
    }

    /// Decode an attribute token, falling back to `default` for unknown names.
    ///
    /// Raw tokens pass through unchanged.
    pub fn decode_attribute_or(&self, token: &AttrToken, default: Attr) -> Attr {
        match token {
            AttrToken::Raw(bits) => Attr::from_bits_retain(*bits),
            AttrToken::Name(name) => self.attributes.get(name).copied().unwrap_or_else(|| {
                warn!("palette: unknown attribute '{name}', using {default:?}");
                default
            }),
        }
    }

    /// Define (or redefine) an attribute name.
    pub fn set_attribute(&mut self, name: impl Into<String>, attr: Attr) {
        self.attributes.insert(name.into(), attr);
    }

    /// Pair names ordered by ascending index.
    pub fn pair_names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, u16)> = self
            .pairs
            .iter()
            .map(|(name, pair)| (name.as_str(), pair.index))
            .collect();
        names.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        names.into_iter().map(|(name, _)| name).collect()
    }

    /// Get a pair by name.
    pub fn pair(&self, name: &str) -> Option<&ColorPair> {
        self.pairs.get(name)
    }

    /// Check if a pair name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.contains_key(name)
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if no pairs are registered.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn next_index(&self) -> Option<u16> {
        self.pairs.values().map(|p| p.index).max().unwrap_or(0).checked_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;

    fn sample() -> Palette {
        Palette::with_entries([
            ("normal", ColorCode::WHITE, ColorCode::BLACK),
            ("error", ColorCode::RED, ColorCode::BLACK),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_indices_are_contiguous() {
        let palette = sample();
        assert_eq!(palette.pair("normal").unwrap().index, 1);
        assert_eq!(palette.pair("error").unwrap().index, 2);
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_initial_entries_reject_duplicate_names() {
        let result = Palette::with_entries([
            ("a", ColorCode::WHITE, ColorCode::BLACK),
            ("a", ColorCode::RED, ColorCode::BLACK),
        ]);
        assert!(matches!(result, Err(Error::DuplicateName(name)) if name == "a"));
    }

    #[test]
    fn test_shorthand_entries() {
        let palette = Palette::with_entries([
            PaletteEntry::from(("warn", ColorCode::YELLOW)),
            PaletteEntry::from(("plain",)),
        ])
        .unwrap();

        let warn = palette.pair("warn").unwrap();
        assert_eq!(warn.fg, ColorCode::YELLOW);
        assert_eq!(warn.bg, ColorCode::DEFAULT);

        let plain = palette.pair("plain").unwrap();
        assert_eq!(plain.fg, ColorCode::DEFAULT);
        assert_eq!(plain.bg, ColorCode::DEFAULT);
    }

    #[test]
    fn test_entry_from_parts() {
        let entry = PaletteEntry::from_parts(&["title", "cyan", "blue"]).unwrap();
        assert_eq!(entry, PaletteEntry::new("title", ColorCode::CYAN, ColorCode::BLUE));

        let entry = PaletteEntry::from_parts(&["title", "cyan"]).unwrap();
        assert_eq!(entry.bg, ColorCode::DEFAULT);

        let entry = PaletteEntry::from_parts(&["title"]).unwrap();
        assert_eq!(entry.fg, ColorCode::DEFAULT);
    }

    #[test]
    fn test_entry_from_parts_bad_arity() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            PaletteEntry::from_parts(&empty),
            Err(Error::InvalidPaletteEntry { arity: 0 })
        ));
        assert!(matches!(
            PaletteEntry::from_parts(&["a", "red", "black", "bold"]),
            Err(Error::InvalidPaletteEntry { arity: 4 })
        ));
    }

    #[test]
    fn test_register_duplicate_name() {
        let mut palette = sample();
        let result = palette.register("error", ColorCode::MAGENTA, ColorCode::BLACK, None, false);
        assert!(matches!(result, Err(Error::DuplicateName(_))));
        assert_eq!(palette.pair("error").unwrap().fg, ColorCode::RED);
    }

    #[test]
    fn test_register_force_replaces() {
        let mut palette = sample();
        let before = palette.resolve("error").unwrap();

        let pair = palette
            .register("error", ColorCode::MAGENTA, ColorCode::BLACK, None, true)
            .unwrap();

        assert_eq!(pair.index, 3);
        assert_eq!(palette.pair("error").unwrap().fg, ColorCode::MAGENTA);
        let after = palette.resolve("error").unwrap();
        assert_ne!(before, after);
        assert_eq!(after, Style::for_pair(3));
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_register_after_highest_index() {
        let mut palette = sample();
        palette
            .add_pair("top", ColorPair::new(u16::MAX, ColorCode::RED, ColorCode::BLACK), true)
            .unwrap();

        let result = palette.register("next", ColorCode::BLUE, ColorCode::BLACK, None, false);
        assert!(matches!(result, Err(Error::PaletteFull)));
        assert!(palette.pair("next").is_none());
        assert_eq!(palette.resolve("default").unwrap(), Style::DEFAULT);
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn test_add_pair_duplicate_index() {
        let mut palette = sample();
        let result = palette.add_pair("other", ColorPair::new(2, ColorCode::BLUE, ColorCode::BLACK), false);
        assert!(matches!(result, Err(Error::DuplicateIndex(2))));

        palette
            .add_pair("other", ColorPair::new(2, ColorCode::BLUE, ColorCode::BLACK), true)
            .unwrap();
        assert_eq!(palette.resolve("other").unwrap(), Style::for_pair(2));
    }

    #[test]
    fn test_pair_names_sorted_by_index() {
        let mut palette = Palette::new();
        palette
            .add_pair("third", ColorPair::new(9, ColorCode::RED, ColorCode::BLACK), true)
            .unwrap();
        palette
            .add_pair("first", ColorPair::new(1, ColorCode::RED, ColorCode::BLACK), true)
            .unwrap();
        palette
            .add_pair("second", ColorPair::new(4, ColorCode::RED, ColorCode::BLACK), true)
            .unwrap();

        assert_eq!(palette.pair_names(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_resolve() {
        let palette = sample();
        assert_eq!(palette.resolve("default").unwrap(), Style::DEFAULT);
        assert_eq!(palette.resolve("error").unwrap(), Style::for_pair(2));

        let raw = Style::for_pair(42) | Attr::BOLD;
        assert_eq!(palette.resolve(raw).unwrap(), raw);
        assert_eq!(palette.resolve(raw.bits()).unwrap(), raw);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let palette = sample();
        assert!(matches!(
            palette.resolve("nope"),
            Err(Error::UnknownName(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_resolve_includes_pair_attrs() {
        let mut palette = Palette::new();
        palette
            .register("alert", ColorCode::RED, ColorCode::BLACK, Some(Attr::BLINK), false)
            .unwrap();
        assert_eq!(palette.resolve("alert").unwrap(), Style::for_pair(1) | Attr::BLINK);
    }

    #[test]
    fn test_decode_attribute() {
        let palette = Palette::new();
        assert_eq!(palette.decode_attribute(&"bold".into()), Attr::BOLD);
        assert_eq!(palette.decode_attribute(&"nonexistent-token".into()), Attr::NORMAL);
        assert_eq!(
            palette.decode_attribute_or(&"nonexistent-token".into(), Attr::DIM),
            Attr::DIM
        );
        assert_eq!(
            palette.decode_attribute(&AttrToken::from(Attr::UNDERLINE | Attr::BOLD)),
            Attr::UNDERLINE | Attr::BOLD
        );
    }

    #[test]
    fn test_set_attribute() {
        let mut palette = Palette::new();
        palette.set_attribute("shout", Attr::BOLD | Attr::UNDERLINE);
        assert_eq!(
            palette.decode_attribute(&"shout".into()),
            Attr::BOLD | Attr::UNDERLINE
        );
    }

    #[test]
    fn test_initialize_all() {
        let palette = sample();
        let mut backend = HeadlessBackend::new(10, 5);
        palette.initialize_all(&mut backend).unwrap();
        palette.initialize_all(&mut backend).unwrap();

        assert_eq!(backend.color_pair(1), Some((ColorCode::WHITE, ColorCode::BLACK)));
        assert_eq!(backend.color_pair(2), Some((ColorCode::RED, ColorCode::BLACK)));
    }

    #[test]
    fn test_initialize_all_without_color() {
        let palette = sample();
        let mut backend = HeadlessBackend::new(10, 5).with_color_support(false);
        palette.initialize_all(&mut backend).unwrap();
        assert_eq!(backend.color_pair(1), None);
    }
}
