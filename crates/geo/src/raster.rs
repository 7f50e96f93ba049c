//! Georeferenced rasters held fully in memory, with the algorithms and IO that operate on them.

pub mod algo;
mod denseraster;
#[cfg(feature = "gdal")]
pub mod io;

#[doc(inline)]
pub use denseraster::DenseRaster;
