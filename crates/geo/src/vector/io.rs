//! Contains functions to read and write vector data using the GDAL library.

use std::path::{Path, PathBuf};

use gdal::{errors::GdalError, vector::FieldValue, vector::LayerAccess};

use crate::{
    Error, Result, gdalinterop,
    vector::{VectorDataset, VectorFeature, VectorFormat, geojson},
};

const SHAPEFILE_SIDECAR_EXTENSIONS: [&str; 8] = ["shp", "shx", "dbf", "prj", "cpg", "qix", "sbn", "sbx"];

/// Open a GDAL vector dataset for reading
pub fn open_read_only(path: &Path) -> Result<gdal::Dataset> {
    let options = gdal::DatasetOptions {
        open_flags: gdal::GdalOpenFlags::GDAL_OF_READONLY | gdal::GdalOpenFlags::GDAL_OF_VECTOR,
        ..Default::default()
    };

    gdal::Dataset::open_ex(path, options).map_err(|err| match err {
        GdalError::NullPointer { .. } if !path.exists() => Error::InvalidPath(PathBuf::from(path)),
        _ => Error::Runtime(format!("Failed to open vector dataset: {} ({})", path.to_string_lossy(), err)),
    })
}

/// Reads the first layer of the vector file into memory
pub fn read_vector_dataset(path: impl AsRef<Path>) -> Result<VectorDataset> {
    let path = path.as_ref();
    let ds = open_read_only(path)?;
    let dataset = read_dataset(&ds)?;
    log::debug!("Read {} features from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Reads the first layer of the dataset into memory, only the numeric fields are kept as attributes.
/// Features without a geometry are an error.
pub fn read_dataset(ds: &gdal::Dataset) -> Result<VectorDataset> {
    let mut layer = ds.layer(0)?;
    let projection = layer.spatial_ref().map(|srs| srs.to_wkt()).transpose()?.unwrap_or_default();
    let layer_name = layer.name();

    let mut features = Vec::new();
    for (index, feature) in layer.features().enumerate() {
        let Some(geometry) = feature.geometry() else {
            return Err(Error::InvalidArgument(format!(
                "Feature {} of layer '{}' has no geometry",
                feature.fid().unwrap_or(index as u64),
                layer_name
            )));
        };

        let attributes = feature
            .fields()
            .filter_map(|(name, value)| match value {
                Some(FieldValue::RealValue(v)) => Some((name, Some(v))),
                Some(FieldValue::IntegerValue(v)) => Some((name, Some(f64::from(v)))),
                Some(FieldValue::Integer64Value(v)) => Some((name, Some(v as f64))),
                None => Some((name, None)),
                Some(_) => None,
            })
            .collect();

        features.push(VectorFeature {
            id: feature.fid(),
            geometry: geometry.to_geo()?,
            attributes,
        });
    }

    Ok(VectorDataset::new(projection, features))
}

/// Removes a previously written output, for shapefiles the sidecar files are removed as well
pub fn remove_existing(path: &Path, format: VectorFormat) -> Result<()> {
    let mut candidates = vec![path.to_path_buf()];
    if format == VectorFormat::ShapeFile {
        candidates.extend(SHAPEFILE_SIDECAR_EXTENSIONS.iter().map(|ext| path.with_extension(ext)));
    }

    for candidate in candidates {
        if candidate.is_file() {
            log::debug!("Removing existing output {}", candidate.display());
            std::fs::remove_file(&candidate)?;
        }
    }

    Ok(())
}

/// Writes the dataset to disk in the requested format.
/// The projection of the dataset is assigned to the output, an existing output file is replaced.
pub fn write_vector_dataset(dataset: &VectorDataset, path: &Path, format: VectorFormat) -> Result<()> {
    if format == VectorFormat::Unknown {
        return Err(Error::InvalidArgument(format!(
            "Unsupported vector output format: {}",
            path.display()
        )));
    }

    remove_existing(path, format)?;

    let tmp = tempfile::Builder::new().prefix("vector").suffix(".geojson").tempfile()?;
    geojson::write_geojson_file(dataset, tmp.path())?;
    let src_ds = open_read_only(tmp.path())?;

    let mut options = vec!["-f".to_string(), format.gdal_driver_name().to_string()];
    if !dataset.projection.is_empty() {
        options.extend(["-a_srs".to_string(), dataset.projection.clone()]);
    }

    if let Some(stem) = path.file_stem() {
        options.extend(["-nln".to_string(), stem.to_string_lossy().to_string()]);
    }

    translate_ds_to_disk(&src_ds, path, &options)?;
    Ok(())
}

/// Translate a GDAL vector dataset to disk using the provided translate options
/// The options are passed as a list of strings in the form `["-option1", "value1", "-option2", "value2"]`
/// and match the options of the gdal ogr2ogr command line tool
pub fn translate_ds_to_disk(ds: &gdal::Dataset, path: &Path, options: &[String]) -> Result<gdal::Dataset> {
    gdalinterop::create_output_directory_if_needed(path)?;
    let path_str = std::ffi::CString::new(path.to_string_lossy().as_ref())?;
    let mut opts = VectorTranslateOptions::new(options)?;
    let mut usage_error: std::ffi::c_int = 0;

    let handle = unsafe {
        gdal_sys::GDALVectorTranslate(
            path_str.as_ptr(),
            std::ptr::null_mut(),
            1,
            &mut ds.c_dataset(),
            opts.c_options(),
            &mut usage_error,
        )
    };

    if usage_error == gdalinterop::TRUE {
        return Err(Error::InvalidArgument("Vector translate: invalid arguments".to_string()));
    }

    let handle = gdalinterop::check_pointer(handle, "GDALVectorTranslate")?;
    Ok(unsafe { gdal::Dataset::from_c_dataset(handle) })
}

struct VectorTranslateOptions {
    options: *mut gdal_sys::GDALVectorTranslateOptions,
}

impl VectorTranslateOptions {
    fn new(opts: &[String]) -> Result<Self> {
        let c_opts = gdalinterop::create_string_list(opts)?;
        let options = unsafe { gdal_sys::GDALVectorTranslateOptionsNew(c_opts.as_ptr(), std::ptr::null_mut()) };
        if options.is_null() {
            return Err(Error::InvalidArgument("Failed to create vector translate options".to_string()));
        }

        Ok(Self { options })
    }

    fn c_options(&mut self) -> *mut gdal_sys::GDALVectorTranslateOptions {
        self.options
    }
}

impl Drop for VectorTranslateOptions {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALVectorTranslateOptionsFree(self.c_options()) };
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo_types::Geometry;

    use super::*;
    use crate::testutils::rect_polygon;

    fn dataset() -> VectorDataset {
        VectorDataset::new(
            "",
            vec![
                VectorFeature::new(None, Geometry::Polygon(rect_polygon(0.0, 0.0, 5.0, 5.0))).with_attribute("mean", Some(0.75)),
                VectorFeature::new(None, Geometry::Polygon(rect_polygon(5.0, 0.0, 10.0, 5.0))).with_attribute("mean", Some(0.0)),
            ],
        )
    }

    #[test_log::test]
    fn write_and_read_geojson() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("sub").join("result.geojson");
        write_vector_dataset(&dataset(), &path, VectorFormat::GeoJson)?;

        let read = read_vector_dataset(&path)?;
        assert_eq!(read.len(), 2);
        assert_relative_eq!(read.features[0].attribute("mean").expect("mean"), 0.75);
        let bounds = crate::vector::geometry::polygons(&read.features[1].geometry)
            .and_then(|multi| crate::vector::geometry::bounds(&multi))
            .expect("polygon geometry");
        assert_relative_eq!(bounds.min_x(), 5.0);
        assert_relative_eq!(bounds.max_x(), 10.0);

        Ok(())
    }

    #[test_log::test]
    fn shapefile_output_replaces_existing() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("result.shp");
        write_vector_dataset(&dataset(), &path, VectorFormat::ShapeFile)?;
        write_vector_dataset(&dataset(), &path, VectorFormat::ShapeFile)?;

        assert!(path.with_extension("dbf").exists());
        assert_eq!(read_vector_dataset(&path)?.len(), 2);

        Ok(())
    }

    #[test_log::test]
    fn feature_without_geometry_is_rejected() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("grid.geojson");
        std::fs::write(
            &path,
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "properties": {}, "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]] } },
                    { "type": "Feature", "properties": {}, "geometry": null },
                    { "type": "Feature", "properties": {}, "geometry": { "type": "Polygon", "coordinates": [[[1, 0], [2, 0], [2, 1], [1, 1], [1, 0]]] } }
                ]
            }"#,
        )?;

        assert!(matches!(read_vector_dataset(&path), Err(Error::InvalidArgument(_))));

        Ok(())
    }

    #[test]
    fn missing_file_is_an_invalid_path() {
        assert!(matches!(
            read_vector_dataset("/this/path/does/not/exist.geojson"),
            Err(Error::InvalidPath(_))
        ));
    }
}
