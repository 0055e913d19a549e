//! Selection geometry for capture gestures.

use crate::geometry::{Point, Rect};
use image::RgbaImage;

/// Rectangle being drawn by the rectangular capture tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub origin: Point,
    pub current: Point,
}

impl SelectionRect {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            current: origin,
        }
    }

    /// Normalized `{x, y, width, height}` form
    pub fn resolve(&self) -> Rect {
        Rect::from_corners(self.origin, self.current)
    }
}

/// Freehand path drawn by the lasso capture tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Lasso {
    points: Vec<Point>,
}

impl Lasso {
    pub fn new(origin: Point) -> Self {
        Self {
            points: vec![origin],
        }
    }

    pub fn origin(&self) -> Point {
        self.points[0]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn push(&mut self, point: Point) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    /// Bounding box of the path
    pub fn bounds(&self) -> Rect {
        let (mut min, mut max) = (self.points[0], self.points[0]);
        for p in &self.points[1..] {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Rect::from_corners(min, max)
    }

    /// Even-odd containment test against the closed path
    pub fn contains(&self, point: Point) -> bool {
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[j]);
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Clear every pixel of `image` that falls outside the path.
    ///
    /// `image` covers `region` (logical coordinates) at whatever resolution it
    /// has; pixel centers are mapped back to logical space before testing.
    pub fn mask(&self, image: &mut RgbaImage, region: Rect) {
        if self.points.len() < 3 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let sx = region.width() / image.width() as f32;
        let sy = region.height() / image.height() as f32;
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let logical = Point::new(
                region.x() + (x as f32 + 0.5) * sx,
                region.y() + (y as f32 + 0.5) * sy,
            );
            if !self.contains(logical) {
                pixel[3] = 0;
            }
        }
    }
}

/// Shape of an in-progress capture selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Rectangle(SelectionRect),
    Freehand(Lasso),
}

impl Selection {
    /// Extend the selection to `point`
    pub fn update(&mut self, point: Point) {
        match self {
            Selection::Rectangle(rect) => rect.current = point,
            Selection::Freehand(lasso) => lasso.push(point),
        }
    }

    /// Region covered by the selection
    pub fn region(&self) -> Rect {
        match self {
            Selection::Rectangle(rect) => rect.resolve(),
            Selection::Freehand(lasso) => lasso.bounds(),
        }
    }

    pub fn origin(&self) -> Point {
        match self {
            Selection::Rectangle(rect) => rect.origin,
            Selection::Freehand(lasso) => lasso.origin(),
        }
    }

    /// Lasso path, if this is a freehand selection
    pub fn lasso(&self) -> Option<&Lasso> {
        match self {
            Selection::Freehand(lasso) => Some(lasso),
            Selection::Rectangle(_) => None,
        }
    }
}
