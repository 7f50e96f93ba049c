//! Planar polygon helpers: bounds, point containment and exact polygon/rectangle overlap.

use geo_types::{Coord, Geometry, LineString, MultiPolygon, Polygon};

use crate::{Point, Rect};

/// The polygonal part of a geometry, `None` for points and lines
pub fn polygons(geom: &Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geom {
        Geometry::Polygon(poly) => Some(MultiPolygon::new(vec![poly.clone()])),
        Geometry::MultiPolygon(multi) => Some(multi.clone()),
        Geometry::Rect(rect) => Some(MultiPolygon::new(vec![rect.to_polygon()])),
        Geometry::Triangle(triangle) => Some(MultiPolygon::new(vec![triangle.to_polygon()])),
        Geometry::GeometryCollection(collection) => {
            let parts: Vec<Polygon<f64>> = collection.iter().filter_map(polygons).flat_map(|mp| mp.0).collect();
            if parts.is_empty() { None } else { Some(MultiPolygon::new(parts)) }
        }
        _ => None,
    }
}

/// Bounding rectangle of the exterior rings, `None` for empty geometries
pub fn bounds(multi: &MultiPolygon<f64>) -> Option<Rect> {
    Rect::from_coords(multi.iter().flat_map(|poly| poly.exterior().coords().copied()))
}

/// Even-odd point in polygon test, points inside holes are outside of the polygon
pub fn contains_point(poly: &Polygon<f64>, p: Point) -> bool {
    std::iter::once(poly.exterior())
        .chain(poly.interiors().iter())
        .fold(false, |inside, ring| inside ^ ring_contains_point(ring, p))
}

pub fn multi_polygon_contains_point(multi: &MultiPolygon<f64>, p: Point) -> bool {
    multi.iter().any(|poly| contains_point(poly, p))
}

fn ring_contains_point(ring: &LineString<f64>, p: Point) -> bool {
    let mut inside = false;
    for line in ring.lines() {
        let (a, b) = (line.start, line.end);
        if (a.y > p.y()) != (b.y > p.y()) {
            let x_cross = a.x + (p.y() - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x() < x_cross {
                inside = !inside;
            }
        }
    }

    inside
}

/// Area of the polygon, holes excluded
pub fn polygon_area(poly: &Polygon<f64>) -> f64 {
    let holes: f64 = poly.interiors().iter().map(|ring| ring_area(&ring_coords(ring))).sum();
    (ring_area(&ring_coords(poly.exterior())) - holes).max(0.0)
}

/// Area of the part of the polygon that lies within the rectangle, holes excluded
pub fn polygon_overlap_area(poly: &Polygon<f64>, rect: &Rect) -> f64 {
    let exterior = ring_overlap_area(poly.exterior(), rect);
    if exterior == 0.0 {
        return 0.0;
    }

    let holes: f64 = poly.interiors().iter().map(|ring| ring_overlap_area(ring, rect)).sum();
    (exterior - holes).max(0.0)
}

/// Area of the parts of the multi polygon that lie within the rectangle
pub fn multi_polygon_overlap_area(multi: &MultiPolygon<f64>, rect: &Rect) -> f64 {
    multi.iter().map(|poly| polygon_overlap_area(poly, rect)).sum()
}

/// Fraction of the rectangle covered by the multi polygon, in the range [0, 1]
pub fn coverage_fraction(multi: &MultiPolygon<f64>, rect: &Rect) -> f64 {
    let area = rect.area();
    if area <= 0.0 {
        return 0.0;
    }

    (multi_polygon_overlap_area(multi, rect) / area).clamp(0.0, 1.0)
}

fn ring_overlap_area(ring: &LineString<f64>, rect: &Rect) -> f64 {
    let coords = ring_coords(ring);
    match Rect::from_coords(coords.iter().copied()) {
        Some(ring_bounds) if ring_bounds.intersects(rect) => ring_area(&clip_ring(coords, rect)),
        _ => 0.0,
    }
}

/// Ring coordinates without the closing coordinate
fn ring_coords(ring: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut coords = ring.0.clone();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }

    coords
}

/// Shoelace formula, independent of the ring orientation
fn ring_area(coords: &[Coord<f64>]) -> f64 {
    if coords.len() < 3 {
        return 0.0;
    }

    let twice_area: f64 = coords
        .iter()
        .zip(coords.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();

    twice_area.abs() / 2.0
}

#[derive(Clone, Copy)]
enum ClipEdge {
    Left(f64),
    Right(f64),
    Bottom(f64),
    Top(f64),
}

impl ClipEdge {
    fn inside(&self, c: Coord<f64>) -> bool {
        match *self {
            ClipEdge::Left(x) => c.x >= x,
            ClipEdge::Right(x) => c.x <= x,
            ClipEdge::Bottom(y) => c.y >= y,
            ClipEdge::Top(y) => c.y <= y,
        }
    }

    fn intersection(&self, a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
        match *self {
            ClipEdge::Left(x) | ClipEdge::Right(x) => {
                let t = (x - a.x) / (b.x - a.x);
                Coord { x, y: a.y + t * (b.y - a.y) }
            }
            ClipEdge::Bottom(y) | ClipEdge::Top(y) => {
                let t = (y - a.y) / (b.y - a.y);
                Coord { x: a.x + t * (b.x - a.x), y }
            }
        }
    }
}

/// Sutherland-Hodgman clipping of a (possibly concave) ring against the rectangle
fn clip_ring(coords: Vec<Coord<f64>>, rect: &Rect) -> Vec<Coord<f64>> {
    let edges = [
        ClipEdge::Left(rect.min_x()),
        ClipEdge::Right(rect.max_x()),
        ClipEdge::Bottom(rect.min_y()),
        ClipEdge::Top(rect.max_y()),
    ];

    edges.iter().fold(coords, |input, edge| {
        let Some(&last) = input.last() else {
            return input;
        };

        let mut output = Vec::with_capacity(input.len() + 4);
        let mut prev = last;
        for &cur in &input {
            match (edge.inside(prev), edge.inside(cur)) {
                (true, true) => output.push(cur),
                (true, false) => output.push(edge.intersection(prev, cur)),
                (false, true) => {
                    output.push(edge.intersection(prev, cur));
                    output.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }

        output
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo_types::{LineString, polygon};

    use super::*;
    use crate::testutils::rect_polygon;

    fn unit_cell(x: f64, y: f64) -> Rect {
        Rect::from_points(Point::new(x, y), Point::new(x + 1.0, y + 1.0))
    }

    #[test]
    fn full_and_partial_cell_overlap() {
        let poly = rect_polygon(0.0, 0.0, 2.5, 2.0);
        assert_relative_eq!(polygon_overlap_area(&poly, &unit_cell(0.0, 0.0)), 1.0);
        assert_relative_eq!(polygon_overlap_area(&poly, &unit_cell(2.0, 0.0)), 0.5);
        assert_relative_eq!(polygon_overlap_area(&poly, &unit_cell(3.0, 0.0)), 0.0);
    }

    #[test]
    fn overlap_of_a_triangle() {
        let poly = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 0.0, y: 1.0)];
        assert_relative_eq!(polygon_overlap_area(&poly, &unit_cell(0.0, 0.0)), 0.5);
        assert_relative_eq!(polygon_area(&poly), 0.5);
    }

    #[test]
    fn overlap_of_a_concave_polygon() {
        // U shape, the notch covers the top half of the middle cell
        let poly = polygon![
            (x: 0.0, y: 0.0), (x: 3.0, y: 0.0), (x: 3.0, y: 1.0), (x: 2.0, y: 1.0),
            (x: 2.0, y: 0.5), (x: 1.0, y: 0.5), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0),
        ];
        assert_relative_eq!(polygon_overlap_area(&poly, &unit_cell(1.0, 0.0)), 0.5);
        assert_relative_eq!(polygon_area(&poly), 2.5);
    }

    #[test]
    fn holes_are_subtracted() {
        let poly = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
            vec![LineString::from(vec![(1.0, 1.0), (1.5, 1.0), (1.5, 2.0), (1.0, 2.0), (1.0, 1.0)])],
        );

        assert_relative_eq!(polygon_overlap_area(&poly, &unit_cell(1.0, 1.0)), 0.5);
        assert_relative_eq!(polygon_area(&poly), 15.5);
        assert!(!contains_point(&poly, Point::new(1.25, 1.5)));
        assert!(contains_point(&poly, Point::new(3.0, 3.0)));
    }

    #[test]
    fn multi_polygon_parts_are_summed() {
        let multi = MultiPolygon::new(vec![rect_polygon(0.0, 0.0, 0.5, 1.0), rect_polygon(0.5, 0.0, 0.75, 1.0)]);
        assert_relative_eq!(coverage_fraction(&multi, &unit_cell(0.0, 0.0)), 0.75);
        assert_relative_eq!(bounds(&multi).expect("bounds").width(), 0.75);
    }

    #[test]
    fn point_containment() {
        let poly = rect_polygon(0.0, 0.0, 5.0, 10.0);
        assert!(contains_point(&poly, Point::new(2.5, 5.0)));
        assert!(!contains_point(&poly, Point::new(7.5, 5.0)));
    }

    #[test]
    fn polygonal_parts_of_geometries() {
        let point = Geometry::Point(geo_types::Point::new(1.0, 1.0));
        assert!(polygons(&point).is_none());

        let poly = Geometry::Polygon(rect_polygon(0.0, 0.0, 1.0, 1.0));
        assert_eq!(polygons(&poly).map(|mp| mp.0.len()), Some(1));
    }
}
