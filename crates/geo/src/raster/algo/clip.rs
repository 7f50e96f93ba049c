use geo_types::MultiPolygon;

use crate::{
    Error, RasterNum, Result,
    raster::DenseRaster,
    vector::geometry::{bounds, multi_polygon_contains_point},
};

/// Crops the raster to the extent of the clip polygons and masks the cells whose center lies outside of the polygons.
/// The polygon coordinates are expected in the raster projection.
///
/// The extent is snapped outwards to the raster grid and limited to the raster extent, the resolution and projection are kept.
/// The nodata value of the result is the provided `nodata` value, the nodata value of the input raster or 0 in that order.
/// When the polygons do not overlap with the raster, a raster with the input extent containing only nodata is returned.
pub fn clip_to_polygons<T: RasterNum>(raster: &DenseRaster<T>, polygons: &MultiPolygon<f64>, nodata: Option<f64>) -> Result<DenseRaster<T>> {
    let Some(clip_bounds) = bounds(polygons) else {
        return Err(Error::InvalidArgument("No clip polygons provided".into()));
    };

    let nodata = nodata.or(raster.metadata().nodata()).unwrap_or(0.0);
    if T::nodata_from_f64(nodata).is_none() {
        return Err(Error::InvalidArgument(format!(
            "Clip nodata value {nodata} does not fit in the raster data type ({})",
            T::TYPE_NAME
        )));
    }

    let src_meta = raster.metadata();
    let Some(window) = src_meta.cell_window(&clip_bounds)? else {
        log::warn!("Clip polygons do not overlap with the raster extent");
        return Ok(DenseRaster::filled_with_nodata(src_meta.copy_with_nodata(Some(nodata))));
    };

    let data = window
        .cells()
        .map(|cell| {
            if multi_polygon_contains_point(polygons, src_meta.cell_center(cell)) {
                raster.as_slice()[cell.index(src_meta.columns())]
            } else {
                T::NODATA
            }
        })
        .collect();

    let meta = src_meta.window_georeference(&window).copy_with_nodata(Some(nodata));
    log::debug!(
        "Clipped raster from {}x{} to {}x{}",
        src_meta.rows(),
        src_meta.columns(),
        meta.rows(),
        meta.columns()
    );

    Ok(DenseRaster::from_parts(meta, data))
}
