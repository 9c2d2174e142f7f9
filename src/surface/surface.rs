//! Surface: an immutable, named grid of textels.
//!
//! The raw layers are kept exactly as authored; the grid is derived from
//! them once, at construction. Shape errors are caught there, while
//! color and attribute names are only resolved at render time.

use super::Textel;
use crate::color::AttrToken;
use crate::error::{Error, Result};
use crate::geometry::Point;
use std::iter::FusedIterator;

/// Name given to surfaces constructed without one.
pub const UNTITLED: &str = "untitled";

/// The three raw layers of a surface.
///
/// `color` and `attr` may be shorter than `image`, both in rows and
/// within a row; missing entries mean "no color" / "no attributes".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layers {
    /// Character rows. All rows must have the same length.
    pub image: Vec<String>,
    /// Color rows: each character names the pair for the matching cell.
    /// A space means no color.
    pub color: Vec<String>,
    /// Attribute rows: one list of tokens per cell.
    pub attr: Vec<Vec<Vec<AttrToken>>>,
}

impl Layers {
    /// Create layers holding only an image.
    pub fn new<S: AsRef<str>>(image: &[S]) -> Self {
        Self {
            image: image.iter().map(|s| s.as_ref().to_string()).collect(),
            color: Vec::new(),
            attr: Vec::new(),
        }
    }

    /// Set the color layer (builder pattern).
    #[must_use]
    pub fn with_color<S: AsRef<str>>(mut self, color: &[S]) -> Self {
        self.color = color.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Set the attribute layer (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, attr: Vec<Vec<Vec<AttrToken>>>) -> Self {
        self.attr = attr;
        self
    }
}

/// Representation of a text graphics object, somewhat like a "text texture".
///
/// Immutable once built. Iterate it to get positioned textels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    name: String,
    raw: Layers,
    grid: Vec<Vec<Textel>>,
    width: usize,
    height: usize,
}

impl Surface {
    /// Build an untitled surface from image rows only.
    pub fn new<S: AsRef<str>>(image: &[S]) -> Result<Self> {
        Self::from_layers(UNTITLED, Layers::new(image))
    }

    /// Build a surface from its raw layers.
    ///
    /// Fails with [`Error::MalformedSurface`] if the image rows differ in
    /// length.
    pub fn from_layers(name: impl Into<String>, raw: Layers) -> Result<Self> {
        let name = name.into();
        check_image(&name, &raw.image)?;

        let width = raw.image.first().map_or(0, |row| row.chars().count());
        let height = raw.image.len();

        let grid = raw
            .image
            .iter()
            .enumerate()
            .map(|(y, row)| {
                let colors: Vec<char> = raw
                    .color
                    .get(y)
                    .map(|r| r.chars().collect())
                    .unwrap_or_default();
                let attrs = raw.attr.get(y);

                row.chars()
                    .enumerate()
                    .map(|(x, glyph)| {
                        let color = colors
                            .get(x)
                            .filter(|c| !c.is_whitespace())
                            .map(ToString::to_string);
                        let cell_attrs = attrs.and_then(|r| r.get(x)).cloned();
                        Textel::new(glyph, color, cell_attrs)
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            name,
            raw,
            grid,
            width,
            height,
        })
    }

    /// Surface name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in cells.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The layers exactly as they were authored.
    pub const fn raw(&self) -> &Layers {
        &self.raw
    }

    /// The textel at (x, y), without a position.
    pub fn textel(&self, x: usize, y: usize) -> Option<&Textel> {
        self.grid.get(y)?.get(x)
    }

    /// Iterate over all textels in row-major order, stamping each with its
    /// `(x, y)` position.
    ///
    /// Every call starts a fresh, independent pass.
    pub fn iter(&self) -> Textels<'_> {
        Textels {
            grid: &self.grid,
            x: 0,
            y: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Surface {
    type Item = Textel;
    type IntoIter = Textels<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Check that all image rows have the same length.
fn check_image(name: &str, image: &[String]) -> Result<()> {
    let mut widths = image.iter().map(|row| row.chars().count());
    if let Some(first) = widths.next() {
        if widths.any(|w| w != first) {
            return Err(Error::malformed(name, "line widths must be equal"));
        }
    }
    Ok(())
}

/// Iterator over the positioned textels of a [`Surface`].
#[derive(Debug, Clone)]
pub struct Textels<'a> {
    grid: &'a [Vec<Textel>],
    x: usize,
    y: usize,
}

impl Iterator for Textels<'_> {
    type Item = Textel;

    fn next(&mut self) -> Option<Textel> {
        loop {
            let row = self.grid.get(self.y)?;
            if let Some(textel) = row.get(self.x) {
                let pos = Point::new(to_coord(self.x), to_coord(self.y));
                self.x += 1;
                return Some(textel.clone().at(pos));
            }
            self.x = 0;
            self.y += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .grid
            .iter()
            .skip(self.y)
            .map(Vec::len)
            .sum::<usize>()
            .saturating_sub(self.x);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Textels<'_> {}

impl FusedIterator for Textels<'_> {}

fn to_coord(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIP: [&str; 6] = [
        "    _      ",
        "  =/ \\=    ",
        "  /-A-\\    ",
        "|/ / \\ \\|  ",
        " \\_\\^/_/___",
        "  m   m    ",
    ];

    #[test]
    fn test_surface_negative() {
        let err = Surface::new(&["1", "12"]).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedSurface { ref name, ref reason }
                if name == UNTITLED && reason == "line widths must be equal"
        ));
    }

    #[test]
    fn test_surface_negative_named() {
        let err = Surface::from_layers("ship", Layers::new(&["ab", "ab", "a"])).unwrap_err();
        assert!(err.to_string().contains("'ship'"));
    }

    #[test]
    fn test_surface_attributes() {
        let surface = Surface::new(&SHIP).unwrap();
        assert_eq!(surface.height(), SHIP.len());
        assert_eq!(surface.width(), SHIP[0].len());
        assert_eq!(surface.name(), UNTITLED);
        assert_eq!(surface.raw().image.len(), SHIP.len());
    }

    #[test]
    fn test_surface_empty() {
        let empty: [&str; 0] = [];
        let surface = Surface::new(&empty).unwrap();
        assert_eq!(surface.width(), 0);
        assert_eq!(surface.height(), 0);
        assert_eq!(surface.iter().count(), 0);
    }

    #[test]
    fn test_width_counts_characters() {
        let surface = Surface::new(&["┌─┐", "└─┘"]).unwrap();
        assert_eq!(surface.width(), 3);
    }

    #[test]
    fn test_iteration_positions() {
        let surface = Surface::new(&["abc", "def"]).unwrap();
        let textels: Vec<Textel> = surface.iter().collect();

        assert_eq!(textels.len(), 6);
        assert_eq!(textels[5].glyph, 'f');
        // second row, third column
        assert_eq!(textels[5].pos, Some(Point::new(2, 1)));
        assert_eq!(textels[1].pos, Some(Point::new(1, 0)));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let surface = Surface::new(&["ab", "cd"]).unwrap();

        let mut first = surface.iter();
        first.next();
        let second: Vec<Textel> = surface.iter().collect();
        let rest: Vec<Textel> = first.collect();

        assert_eq!(second.len(), 4);
        assert_eq!(rest.len(), 3);
        assert_eq!(second[0].pos, Some(Point::new(0, 0)));
        assert_eq!(rest[0].pos, Some(Point::new(1, 0)));

        // the stored grid stays position-less
        assert_eq!(surface.textel(0, 0).unwrap().pos, None);
    }

    #[test]
    fn test_iteration_size_hint() {
        let surface = Surface::new(&["abc", "def"]).unwrap();
        let mut it = surface.iter();
        assert_eq!(it.len(), 6);
        it.next();
        it.next();
        it.next();
        assert_eq!(it.len(), 3);
    }

    #[test]
    fn test_ragged_color_and_attr_layers() {
        let layers = Layers::new(&["abc", "def"])
            .with_color(&["r g"])
            .with_attr(vec![vec![vec!["bold".into()], vec![]]]);
        let surface = Surface::from_layers("layers", layers).unwrap();

        let a = surface.textel(0, 0).unwrap();
        assert_eq!(a.color.as_deref(), Some("r"));
        assert_eq!(a.attrs, Some(vec![AttrToken::from("bold")]));

        let b = surface.textel(1, 0).unwrap();
        assert_eq!(b.color, None);
        assert_eq!(b.attrs, Some(vec![]));

        let c = surface.textel(2, 0).unwrap();
        assert_eq!(c.color.as_deref(), Some("g"));
        assert_eq!(c.attrs, None);

        let f = surface.textel(2, 1).unwrap();
        assert_eq!(f.color, None);
        assert_eq!(f.attrs, None);
    }

    #[test]
    fn test_longer_color_row_is_ignored() {
        let layers = Layers::new(&["ab"]).with_color(&["rrrr"]);
        let surface = Surface::from_layers("wide", layers).unwrap();
        assert_eq!(surface.iter().count(), 2);
    }
}
