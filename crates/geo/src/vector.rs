//! Polygon datasets, planar geometry helpers and vector IO.

mod dataset;
pub mod geojson;
pub mod geometry;
#[cfg(feature = "gdal")]
pub mod io;

use std::path::Path;

#[doc(inline)]
pub use dataset::{VectorDataset, VectorFeature};

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorFormat {
    ShapeFile,
    GeoJson,
    Unknown,
}

impl VectorFormat {
    /// Given a file path, guess the vector type based on the file extension
    pub fn guess_from_path(file_path: &Path) -> VectorFormat {
        let ext = file_path.extension().map(|ext| ext.to_string_lossy().to_lowercase());

        match ext.as_deref() {
            Some("shp") => VectorFormat::ShapeFile,
            Some("geojson") => VectorFormat::GeoJson,
            _ => VectorFormat::Unknown,
        }
    }

    /// The format for writing results to the provided path, only shapefiles and geojson files are supported
    pub fn for_output(file_path: &Path) -> Result<VectorFormat> {
        match VectorFormat::guess_from_path(file_path) {
            VectorFormat::Unknown => Err(Error::InvalidArgument(format!(
                "File format of '{}' must be '.shp' or '.geojson'",
                file_path.display()
            ))),
            format => Ok(format),
        }
    }

    pub fn gdal_driver_name(&self) -> &'static str {
        match self {
            VectorFormat::ShapeFile => "ESRI Shapefile",
            VectorFormat::GeoJson => "GeoJSON",
            VectorFormat::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectorformat_guess_from_path() {
        assert_eq!(VectorFormat::guess_from_path(Path::new("out.shp")), VectorFormat::ShapeFile);
        assert_eq!(VectorFormat::guess_from_path(Path::new("out.SHP")), VectorFormat::ShapeFile);
        assert_eq!(VectorFormat::guess_from_path(Path::new("out.geojson")), VectorFormat::GeoJson);
        assert_eq!(VectorFormat::guess_from_path(Path::new("out.gpkg")), VectorFormat::Unknown);
        assert_eq!(VectorFormat::guess_from_path(Path::new("out")), VectorFormat::Unknown);
    }

    #[test]
    fn output_format_selection() {
        assert_eq!(VectorFormat::for_output(Path::new("/tmp/a.shp")).ok(), Some(VectorFormat::ShapeFile));
        assert_eq!(VectorFormat::for_output(Path::new("/tmp/a.geojson")).ok(), Some(VectorFormat::GeoJson));
        assert!(VectorFormat::for_output(Path::new("/tmp/a.csv")).is_err());
        assert!(VectorFormat::for_output(Path::new("/tmp/a.json")).is_err());
        assert_eq!(VectorFormat::ShapeFile.gdal_driver_name(), "ESRI Shapefile");
        assert_eq!(VectorFormat::GeoJson.gdal_driver_name(), "GeoJSON");
    }
}
