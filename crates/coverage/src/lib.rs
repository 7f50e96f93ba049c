#![warn(clippy::unwrap_used)]

//! Quadrat coverage: per-polygon coverage of a thresholded raster condition.
//!
//! The shared pipeline clips a raster to an area of interest, binarizes it using a threshold
//! and computes exact overlap zonal statistics for every polygon of a grid.
//! It is driven either by a host GIS session ([`interactive`]) or by an INI configuration file ([`batch`]).

pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod batch;
pub mod collector;
pub mod config;
mod error;
pub mod interactive;
mod job;
pub mod materialize;
pub mod pipeline;
pub mod session;
#[cfg(test)]
mod testutils;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use job::{Job, OutputSink, RasterSource, VectorSource};
