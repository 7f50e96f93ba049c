//! Axis aligned rectangles in map coordinates.

use approx::{AbsDiffEq, RelativeEq};

use crate::Point;

/// Axis aligned rectangle stored as its north-west and south-east corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    top_left: Point,
    bottom_right: Point,
}

impl Rect {
    /// Creates the rectangle spanned by two arbitrary corner points
    pub fn from_points(p1: Point, p2: Point) -> Self {
        let top_left = Point::new(p1.x().min(p2.x()), p1.y().max(p2.y()));
        let bottom_right = Point::new(p1.x().max(p2.x()), p1.y().min(p2.y()));

        Rect { top_left, bottom_right }
    }

    pub fn from_nw_se(nw: Point, se: Point) -> Self {
        Rect {
            top_left: nw,
            bottom_right: se,
        }
    }

    /// Bounding rectangle of a set of coordinates, `None` when there are no coordinates
    pub fn from_coords(coords: impl IntoIterator<Item = geo_types::Coord<f64>>) -> Option<Self> {
        coords.into_iter().fold(None, |bounds: Option<Rect>, coord| {
            let p = Point::from(coord);
            Some(match bounds {
                Some(bounds) => bounds.expanded_to_include(p),
                None => Rect::from_points(p, p),
            })
        })
    }

    pub fn width(&self) -> f64 {
        (self.bottom_right.x() - self.top_left.x()).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.top_left.y() - self.bottom_right.y()).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.bottom_right.x(), self.top_left.y())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.top_left.x(), self.bottom_right.y())
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn min_x(&self) -> f64 {
        self.top_left.x()
    }

    pub fn max_x(&self) -> f64 {
        self.bottom_right.x()
    }

    pub fn min_y(&self) -> f64 {
        self.bottom_right.y()
    }

    pub fn max_y(&self) -> f64 {
        self.top_left.y()
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x() >= self.min_x() && p.x() <= self.max_x() && p.y() >= self.min_y() && p.y() <= self.max_y()
    }

    /// Smallest rectangle containing both this rectangle and the point
    pub fn expanded_to_include(&self, p: Point) -> Rect {
        Rect::from_nw_se(
            Point::new(self.min_x().min(p.x()), self.max_y().max(p.y())),
            Point::new(self.max_x().max(p.x()), self.min_y().min(p.y())),
        )
    }

    /// Smallest rectangle containing both rectangles
    pub fn union(&self, other: &Rect) -> Rect {
        self.expanded_to_include(other.top_left).expanded_to_include(other.bottom_right)
    }

    /// Rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x() < other.max_x()
            && self.max_x() > other.min_x()
            && self.max_y() > other.min_y()
            && self.min_y() < other.max_y()
    }

    /// The overlapping part of both rectangles, `None` if they do not intersect
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        Some(Rect::from_nw_se(
            Point::new(self.min_x().max(other.min_x()), self.max_y().min(other.max_y())),
            Point::new(self.max_x().min(other.max_x()), self.min_y().max(other.min_y())),
        ))
    }
}

impl From<Rect> for geo_types::Polygon<f64> {
    fn from(rect: Rect) -> geo_types::Polygon<f64> {
        geo_types::Polygon::new(
            geo_types::LineString::from(vec![
                rect.top_left(),
                rect.top_right(),
                rect.bottom_right(),
                rect.bottom_left(),
                rect.top_left(),
            ]),
            Vec::default(),
        )
    }
}

impl AbsDiffEq for Rect {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.top_left.abs_diff_eq(&other.top_left, epsilon) && self.bottom_right.abs_diff_eq(&other.bottom_right, epsilon)
    }
}

impl RelativeEq for Rect {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.top_left.relative_eq(&other.top_left, epsilon, max_relative)
            && self.bottom_right.relative_eq(&other.bottom_right, epsilon, max_relative)
    }
}
