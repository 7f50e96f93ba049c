#![warn(clippy::unwrap_used)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Geospatial building blocks for the quadrat coverage tooling:
//! georeferenced dense rasters, polygon datasets and the raster/vector
//! algorithms (clipping, thresholding, exact-overlap zonal statistics).

pub type Result<T = ()> = std::result::Result<T, Error>;

mod cell;
mod error;
#[cfg(feature = "gdal")]
pub mod gdalinterop;
mod georeference;
mod geotransform;
mod nodata;
pub mod raster;
mod rasternum;
pub mod rect;
#[cfg(feature = "gdal")]
mod runtimeconfiguration;
#[cfg(feature = "gdal")]
pub mod srs;
#[cfg(test)]
mod testutils;
pub mod vector;
pub mod zonal;

pub type Point<T = f64> = geo_types::Point<T>;

#[doc(inline)]
pub use cell::Cell;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use georeference::{CellSize, GeoReference, RasterSize};
#[doc(inline)]
pub use geotransform::GeoTransform;
#[doc(inline)]
pub use nodata::Nodata;
#[doc(inline)]
pub use rasternum::RasterNum;
#[doc(inline)]
pub use rect::Rect;
#[cfg(feature = "gdal")]
#[cfg_attr(docsrs, doc(cfg(feature = "gdal")))]
pub use runtimeconfiguration::RuntimeConfiguration;
