use crate::{Nodata, RasterNum, raster::DenseRaster};

/// Classifies the raster using a threshold: cells with a value strictly above the threshold become 1, others 0.
/// Nodata cells stay nodata, the resulting raster uses 255 as nodata value when the input contains nodata.
pub fn binarize<T: RasterNum>(raster: &DenseRaster<T>, threshold: f64) -> DenseRaster<u8> {
    let has_nodata = raster.metadata().nodata().is_some() || raster.iter().any(|v| v.is_nodata());
    let nodata = has_nodata.then(|| f64::from(u8::NODATA));

    let data = raster
        .iter()
        .map(|&v| match v.to_f64_opt() {
            Some(v) if v > threshold => 1,
            Some(_) => 0,
            None => u8::NODATA,
        })
        .collect();

    DenseRaster::from_parts(raster.metadata().copy_with_nodata(nodata), data)
}
