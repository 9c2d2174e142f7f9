//! Configuration file.
//!
//! ```toml
//! [terminal]
//! alternate_screen = true
//! hide_cursor = true
//!
//! [palette]
//! pairs = [
//!     ["text", "white", "black"],
//!     ["alert", "red"],
//!     ["plain"],
//! ]
//!
//! [palette.attributes]
//! loud = ["bold", "underline"]
//! ```
//!
//! Every table and field is optional.

use crate::backend::TerminalConfig;
use crate::color::{Attr, AttrToken, Palette, PaletteEntry};
use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The whole configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Terminal setup.
    pub terminal: TerminalConfig,
    /// Initial palette.
    pub palette: PaletteConfig,
}

/// The `[palette]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// `[name, fg?, bg?]` entries, indexed from 1 in order.
    pub pairs: Vec<Vec<String>>,
    /// Extra attribute names, each the union of the listed tokens.
    pub attributes: BTreeMap<String, Vec<AttrToken>>,
}

impl Config {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse a configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Build the palette described by `[palette]`.
    ///
    /// Pairs are not pushed to any backend yet.
    pub fn palette(&self) -> Result<Palette> {
        self.palette.build()
    }
}

impl PaletteConfig {
    /// Build the palette.
    pub fn build(&self) -> Result<Palette> {
        let entries = self
            .pairs
            .iter()
            .map(|parts| PaletteEntry::from_parts(parts))
            .collect::<Result<Vec<_>>>()?;
        let mut palette = Palette::with_entries(entries)?;

        for (name, tokens) in &self.attributes {
            let attr = tokens
                .iter()
                .fold(Attr::NORMAL, |acc, token| acc | palette.decode_attribute(token));
            palette.set_attribute(name.clone(), attr);
        }

        Ok(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorCode, Style};
    use crate::error::Error;

    const SAMPLE: &str = r#"
[terminal]
hide_cursor = false

[palette]
pairs = [
    ["text", "white", "black"],
    ["alert", "red"],
    ["plain"],
    ["deep", "208", "-1"],
]

[palette.attributes]
loud = ["bold", "underline"]
raw = [1]
"#;

    #[test]
    fn test_parse_sample() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert!(!config.terminal.hide_cursor);
        assert!(config.terminal.alternate_screen);
        assert_eq!(config.palette.pairs.len(), 4);

        let palette = config.palette().unwrap();
        assert_eq!(palette.pair_names(), vec!["text", "alert", "plain", "deep"]);

        let alert = palette.pair("alert").unwrap();
        assert_eq!((alert.fg, alert.bg), (ColorCode::RED, ColorCode::DEFAULT));
        let deep = palette.pair("deep").unwrap();
        assert_eq!(deep.fg, ColorCode::indexed(208));
    }

    #[test]
    fn test_custom_attributes() {
        let palette = Config::from_toml_str(SAMPLE).unwrap().palette().unwrap();
        assert_eq!(
            palette.decode_attribute(&AttrToken::from("loud")),
            Attr::BOLD | Attr::UNDERLINE
        );
        assert_eq!(
            palette.decode_attribute(&AttrToken::from("raw")),
            Attr::from_bits_retain(1)
        );
        assert_eq!(palette.resolve("default").unwrap(), Style::DEFAULT);
    }

    #[test]
    fn test_empty_document() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.palette().unwrap().is_empty());
    }

    #[test]
    fn test_bad_entries() {
        let err = Config::from_toml_str("[palette]\npairs = [[\"a\", \"red\", \"blue\", \"x\"]]")
            .unwrap()
            .palette()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPaletteEntry { arity: 4 }));

        let err = Config::from_toml_str("[palette]\npairs = [[\"a\", \"mauve\"]]")
            .unwrap()
            .palette()
            .unwrap_err();
        assert!(matches!(err, Error::UnknownColor(_)));

        let err = Config::from_toml_str("[palette]\npairs = [[\"a\"], [\"a\"]]")
            .unwrap()
            .palette()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            Config::from_toml_str("[palette"),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xo1.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.palette().unwrap().len(), 4);
        assert!(Config::load(dir.path().join("missing.toml")).is_err());
    }
}
