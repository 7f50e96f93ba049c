//! Contains functions to read and write rasters using the GDAL library.

use std::path::{Path, PathBuf};

use gdal::{errors::GdalError, raster::Buffer, raster::GdalType};

use crate::{Error, GeoReference, RasterNum, RasterSize, Result, gdalinterop, raster::DenseRaster};

/// Open a GDAL raster dataset for reading
pub fn open_read_only(path: &Path) -> Result<gdal::Dataset> {
    let options = gdal::DatasetOptions {
        open_flags: gdal::GdalOpenFlags::GDAL_OF_READONLY | gdal::GdalOpenFlags::GDAL_OF_RASTER,
        ..Default::default()
    };

    gdal::Dataset::open_ex(path, options).map_err(|err| match err {
        // Give a cleaner error message when the file does not exist
        GdalError::NullPointer { .. } if !path.exists() => Error::InvalidPath(PathBuf::from(path)),
        _ => Error::Runtime(format!("Failed to open raster dataset: {} ({})", path.to_string_lossy(), err)),
    })
}

/// Reads the [`crate::GeoReference`] from the provided band of a raster dataset
/// The band index is 1-based
pub fn read_band_metadata(ds: &gdal::Dataset, band_index: usize) -> Result<GeoReference> {
    let rasterband = ds.rasterband(band_index)?;
    let (width, height) = ds.raster_size();

    Ok(GeoReference::new(
        ds.projection(),
        RasterSize::with_rows_cols(height, width),
        ds.geo_transform()?.into(),
        rasterband.no_data_value(),
    ))
}

/// Reads the first band of the raster file, nodata cells are converted to `T::NODATA`
pub fn read_raster<T: RasterNum + GdalType>(path: impl AsRef<Path>) -> Result<DenseRaster<T>> {
    let path = path.as_ref();
    let ds = open_read_only(path)?;
    let metadata = read_band_metadata(&ds, 1)?;
    let (_shape, data) = ds.rasterband(1)?.read_band_as::<T>()?.into_shape_and_vec();

    log::debug!(
        "Read {}x{} {} raster from {}",
        metadata.rows(),
        metadata.columns(),
        T::TYPE_NAME,
        path.display()
    );

    DenseRaster::from_foreign_data(metadata, data)
}

/// Writes the raster as a GeoTIFF file
pub fn write_raster<T: RasterNum + GdalType>(raster: &DenseRaster<T>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let meta = raster.metadata();
    if T::NODATA.to_f64().is_some_and(|v| v >= 0.0) && meta.nodata().is_some_and(|v| v < 0.0) {
        return Err(Error::InvalidArgument(
            "Trying to store a raster with unsigned data type using a negative nodata value".to_string(),
        ));
    }

    gdalinterop::create_output_directory_if_needed(path)?;

    let driver = gdal::DriverManager::get_driver_by_name("GTiff")?;
    let mut ds = driver.create_with_band_type::<T, _>(path, meta.columns(), meta.rows(), 1)?;
    ds.set_geo_transform(&meta.geo_transform().into())?;
    ds.set_projection(meta.projection())?;

    let mut band = ds.rasterband(1)?;
    band.set_no_data_value(meta.nodata())?;

    let mut buffer = Buffer::new((meta.columns(), meta.rows()), raster.to_foreign_data());
    band.write((0, 0), (meta.columns(), meta.rows()), &mut buffer)?;

    Ok(())
}
