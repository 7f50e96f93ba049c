//! Quadrat coverage workspace: geospatial building blocks and the coverage pipeline.

pub use coverage;
pub use geo;
