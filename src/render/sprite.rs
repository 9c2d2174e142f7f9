//! Ready-made drawables: surface sprites and text labels.

use super::drawable::{CellStream, CellStyle, DrawCell, Drawable};
use crate::color::AttrToken;
use crate::geometry::{Point, Vec2};
use crate::surface::Surface;
use std::sync::Arc;
use unicode_width::UnicodeWidthChar;

/// A surface placed at one or more anchors.
///
/// The surface is shared, so many sprites can show the same image.
#[derive(Debug, Clone)]
pub struct Sprite {
    surface: Arc<Surface>,
    anchors: Vec<Vec2>,
    priority: i32,
    draw_on_border: bool,
}

impl Sprite {
    /// Place `surface` at `anchor` with priority 0.
    pub fn new(surface: impl Into<Arc<Surface>>, anchor: impl Into<Vec2>) -> Self {
        Self {
            surface: surface.into(),
            anchors: vec![anchor.into()],
            priority: 0,
            draw_on_border: false,
        }
    }

    /// Set the render priority (builder pattern).
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Allow drawing on the border ring (builder pattern).
    #[must_use]
    pub const fn on_border(mut self, draw_on_border: bool) -> Self {
        self.draw_on_border = draw_on_border;
        self
    }

    /// Draw the surface at another anchor too (builder pattern).
    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<Vec2>) -> Self {
        self.anchors.push(anchor.into());
        self
    }

    /// Move the sprite to a single anchor.
    pub fn move_to(&mut self, anchor: impl Into<Vec2>) {
        self.anchors.clear();
        self.anchors.push(anchor.into());
    }

    /// The shown surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

impl Drawable for Sprite {
    fn render_priority(&self) -> i32 {
        self.priority
    }

    fn draw_on_border(&self) -> bool {
        self.draw_on_border
    }

    fn anchors(&self) -> Vec<Vec2> {
        self.anchors.clone()
    }

    fn cells(&self) -> CellStream<'_> {
        Box::new(self.surface.iter().map(|textel| {
            let style = CellStyle::Named {
                color: textel.color,
                attrs: textel.attrs.unwrap_or_default(),
            };
            Ok(DrawCell::new(
                textel.pos.unwrap_or(Point::ORIGIN),
                textel.glyph,
                style,
            ))
        }))
    }
}

/// A single line of text.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    anchor: Vec2,
    color: Option<String>,
    attrs: Vec<AttrToken>,
    priority: i32,
    draw_on_border: bool,
}

impl Label {
    /// Create a label at `anchor` in the backend's default style.
    pub fn new(text: impl Into<String>, anchor: impl Into<Vec2>) -> Self {
        Self {
            text: text.into(),
            anchor: anchor.into(),
            color: None,
            attrs: Vec::new(),
            priority: 0,
            draw_on_border: false,
        }
    }

    /// Set the pair name (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Add an attribute token (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, token: impl Into<AttrToken>) -> Self {
        self.attrs.push(token.into());
        self
    }

    /// Set the render priority (builder pattern).
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Allow drawing on the border ring (builder pattern).
    #[must_use]
    pub const fn on_border(mut self, draw_on_border: bool) -> Self {
        self.draw_on_border = draw_on_border;
        self
    }

    /// Move the label.
    pub fn move_to(&mut self, anchor: impl Into<Vec2>) {
        self.anchor = anchor.into();
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn style(&self) -> CellStyle {
        if self.color.is_none() && self.attrs.is_empty() {
            return CellStyle::Plain;
        }
        CellStyle::Named {
            color: self.color.clone(),
            attrs: self.attrs.clone(),
        }
    }
}

impl Drawable for Label {
    fn render_priority(&self) -> i32 {
        self.priority
    }

    fn draw_on_border(&self) -> bool {
        self.draw_on_border
    }

    fn anchors(&self) -> Vec<Vec2> {
        vec![self.anchor]
    }

    fn cells(&self) -> CellStream<'_> {
        let style = self.style();

        // Wide glyphs take two columns.
        let mut column = 0i32;
        Box::new(self.text.chars().map(move |glyph| {
            let pos = Point::new(column, 0);
            let width = glyph.width().unwrap_or(0);
            column += i32::try_from(width).unwrap_or(1);
            Ok(DrawCell::new(pos, glyph, style.clone()))
        }))
    }
}
