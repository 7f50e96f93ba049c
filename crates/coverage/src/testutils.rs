use geo::{CellSize, GeoReference, Point, RasterSize, raster::DenseRaster, vector::VectorDataset, vector::VectorFeature};
use geo_types::{Geometry, LineString, Polygon};

pub const EXTENT: f64 = 10.0;

/// 10x10 raster with unit cells covering [0, 10] x [0, 10]
pub fn uniform_raster(value: f64) -> DenseRaster<f64> {
    let meta = GeoReference::with_top_left(
        "",
        RasterSize::with_rows_cols(10, 10),
        Point::new(0.0, EXTENT),
        CellSize::square(1.0),
        None,
    );
    DenseRaster::filled_with(meta, value)
}

pub fn rect_polygon(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![(min_x, min_y), (max_x, min_y), (max_x, max_y), (min_x, max_y), (min_x, min_y)]),
        Vec::new(),
    )
}

pub fn whole_extent() -> Polygon<f64> {
    rect_polygon(0.0, 0.0, EXTENT, EXTENT)
}

pub fn left_half() -> Polygon<f64> {
    rect_polygon(0.0, 0.0, EXTENT / 2.0, EXTENT)
}

pub fn right_half() -> Polygon<f64> {
    rect_polygon(EXTENT / 2.0, 0.0, EXTENT, EXTENT)
}

pub fn grid_of(polygons: Vec<Polygon<f64>>) -> VectorDataset {
    VectorDataset::new(
        "",
        polygons
            .into_iter()
            .enumerate()
            .map(|(i, poly)| VectorFeature::new(Some(i as u64), Geometry::Polygon(poly)))
            .collect(),
    )
}

/// Clip dataset covering the left half of the raster
pub fn half_clip() -> VectorDataset {
    grid_of(vec![left_half()])
}
