//! Point and Vec2: cell positions and sub-cell anchors.

use std::ops::Add;

/// An integer cell position (column `x`, row `y`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin (0, 0).
    pub const ORIGIN: Self = Self::new(0, 0);
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// An object anchor. May sit between cells.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Vec2 {
    /// Create a new anchor.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Absolute cell of `local` relative to this anchor.
    ///
    /// The sum is truncated toward zero once, per axis.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn cell(self, local: Point) -> Point {
        Point::new(
            (self.x + local.x as f32).trunc() as i32,
            (self.y + local.y as f32).trunc() as i32,
        )
    }
}

impl std::fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Point> for Vec2 {
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn from(p: Point) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

impl From<(i32, i32)> for Vec2 {
    #[inline]
    fn from(p: (i32, i32)) -> Self {
        Point::from(p).into()
    }
}

impl From<(f32, f32)> for Vec2 {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}
