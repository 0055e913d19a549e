//! Plain geometry value types shared by every surface.
//!
//! All coordinates are logical pixels in the host's screen space. Surfaces
//! that need their own space convert at their boundary.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

/// A width/height pair in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp both dimensions to at least `floor`
    pub fn at_least(&self, floor: f32) -> Extent {
        Extent::new(self.width.max(floor), self.height.max(floor))
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Pixel dimensions after scaling, rounded to the nearest whole pixel
    pub fn to_pixels(&self, scale: f32) -> (u32, u32) {
        (
            (self.width * scale).round().max(0.0) as u32,
            (self.height * scale).round().max(0.0) as u32,
        )
    }
}

impl From<(f32, f32)> for Extent {
    fn from((width, height): (f32, f32)) -> Self {
        Extent::new(width, height)
    }
}

/// An axis-aligned rectangle: top-left origin plus extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Extent,
}

impl Rect {
    pub const fn new(origin: Point, size: Extent) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Point::new(x, y), Extent::new(width, height))
    }

    /// Normalize two arbitrary corners into a rectangle via min/abs
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::from_xywh(
            a.x.min(b.x),
            a.y.min(b.y),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Inclusive containment on all four edges
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.right()
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x().max(other.x());
        let top = self.y().max(other.y());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left < right && top < bottom {
            Some(Rect::from_xywh(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Multiply every coordinate by `factor`
    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::from_xywh(
            self.x() * factor,
            self.y() * factor,
            self.width() * factor,
            self.height() * factor,
        )
    }

    /// A rectangle of `size` centered on `center`
    pub fn centered_at(center: Point, size: Extent) -> Rect {
        Rect::new(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        )
    }
}
