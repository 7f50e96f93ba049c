use approx::relative_eq;
use geo_types::{LineString, Polygon};

use crate::{CellSize, GeoReference, Point, RasterNum, RasterSize, raster::DenseRaster};

/// Marker for nodata cells in test data
pub const NOD: f64 = 255.0;

/// North-up georeference with unit cells, the bottom left corner of the raster is at the origin
pub fn georef(rows: usize, cols: usize, nodata: Option<f64>) -> GeoReference {
    GeoReference::with_top_left(
        "",
        RasterSize::with_rows_cols(rows, cols),
        Point::new(0.0, rows as f64),
        CellSize::square(1.0),
        nodata,
    )
}

pub fn raster_from_values<T: RasterNum>(meta: GeoReference, data: &[f64]) -> DenseRaster<T> {
    let data = data
        .iter()
        .map(|&v| {
            if relative_eq!(v, NOD) {
                T::NODATA
            } else {
                num::NumCast::from(v).expect("f64 could not be converted to the specified type")
            }
        })
        .collect();

    DenseRaster::new(meta, data).expect("Invalid test raster")
}

/// Axis aligned rectangular polygon
pub fn rect_polygon(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![(min_x, min_y), (max_x, min_y), (max_x, max_y), (min_x, max_y), (min_x, min_y)]),
        Vec::new(),
    )
}
