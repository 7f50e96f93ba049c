//! Algorithms for raster data processing.

mod binarize;
mod clip;

pub use binarize::binarize;
pub use clip::clip_to_polygons;
