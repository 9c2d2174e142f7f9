//! TOML surface files.
//!
//! ```toml
//! [meta]
//! name = "ship"
//!
//! [layers]
//! image = [" /\\ ", "/__\\"]
//! color = [" rr ", "gggg"]
//! attr = [[[], ["bold"], ["bold"], []]]
//! ```
//!
//! Every layer is checked for list shape before the surface is built.
//! In the `attr` layer a cell may be a list of tokens or a single token.

use super::{Layers, Surface};
use crate::color::AttrToken;
use crate::error::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// Name used when a file has no `meta.name`.
const UNNAMED: &str = "Unnamed";

/// A surface document: raw layers plus where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceFile {
    /// `meta.name` of the document.
    pub name: String,
    /// Path the document was loaded from, if any.
    pub filename: Option<PathBuf>,
    /// The raw layers.
    pub layers: Layers,
}

#[derive(Serialize)]
struct Document<'a> {
    meta: Meta<'a>,
    layers: LayersDoc<'a>,
}

#[derive(Serialize)]
struct Meta<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct LayersDoc<'a> {
    image: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    color: &'a [String],
    #[serde(skip_serializing_if = "<[Vec<Vec<AttrToken>>]>::is_empty")]
    attr: &'a [Vec<Vec<AttrToken>>],
}

impl SurfaceFile {
    /// Wrap the layers of an existing surface.
    pub fn from_surface(surface: &Surface) -> Self {
        Self {
            name: surface.name().to_string(),
            filename: None,
            layers: surface.raw().clone(),
        }
    }

    /// Load a surface document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut file = Self::parse(&text, Some(&path.display().to_string()))?;
        file.filename = Some(path.to_path_buf());
        Ok(file)
    }

    /// Parse a surface document from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, None)
    }

    fn parse(text: &str, origin: Option<&str>) -> Result<Self> {
        let doc: Table = text.parse()?;

        let name = doc
            .get("meta")
            .and_then(|meta| meta.get("name"))
            .and_then(Value::as_str)
            .unwrap_or(UNNAMED)
            .to_string();
        // Shape errors name the file when there is one.
        let label = origin.unwrap_or(&name);

        let Some(layers) = doc.get("layers").and_then(Value::as_table) else {
            return Err(Error::malformed(label, "layers table is missing"));
        };

        let image = layers
            .get("image")
            .and_then(string_list)
            .ok_or_else(|| Error::malformed(label, "image layer must be list of strings"))?;

        let color = match layers.get("color") {
            None => Vec::new(),
            Some(value) => string_list(value)
                .ok_or_else(|| Error::malformed(label, "color layer must be list of strings"))?,
        };

        let attr = match layers.get("attr") {
            None => Vec::new(),
            Some(value) => attr_rows(value).ok_or_else(|| {
                Error::malformed(label, "attr layer must be list of lists of attribute tokens")
            })?,
        };

        Ok(Self {
            name,
            filename: None,
            layers: Layers { image, color, attr },
        })
    }

    /// Build the surface, validating the image layer.
    pub fn into_surface(self) -> Result<Surface> {
        Surface::from_layers(self.name, self.layers)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        let doc = Document {
            meta: Meta { name: &self.name },
            layers: LayersDoc {
                image: &self.layers.image,
                color: &self.layers.color,
                attr: &self.layers.attr,
            },
        };
        Ok(toml::to_string(&doc)?)
    }

    /// Write the document to `path`.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Write the document back to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        match &self.filename {
            Some(path) => self.save_as(path),
            None => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "file name was not provided",
            ))),
        }
    }
}

impl Surface {
    /// Load a surface from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        SurfaceFile::load(path)?.into_surface()
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn attr_rows(value: &Value) -> Option<Vec<Vec<Vec<AttrToken>>>> {
    value
        .as_array()?
        .iter()
        .map(|row| row.as_array()?.iter().map(attr_cell).collect())
        .collect()
}

fn attr_cell(value: &Value) -> Option<Vec<AttrToken>> {
    match value {
        Value::Array(tokens) => tokens.iter().map(attr_token).collect(),
        single => attr_token(single).map(|token| vec![token]),
    }
}

fn attr_token(value: &Value) -> Option<AttrToken> {
    match value {
        Value::String(name) => Some(AttrToken::Name(name.clone())),
        Value::Integer(bits) => u16::try_from(*bits).ok().map(AttrToken::Raw),
        _ => None,
    }
}
