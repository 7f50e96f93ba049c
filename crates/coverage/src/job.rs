use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use bon::bon;
use geo::{
    raster::DenseRaster,
    vector::{VectorDataset, VectorFormat},
    zonal::Operation,
};

use crate::Result;

/// Raster input of the pipeline
#[derive(Clone, Debug)]
pub enum RasterSource {
    File(PathBuf),
    Memory(Arc<DenseRaster<f64>>),
}

impl RasterSource {
    pub fn load(&self) -> Result<Arc<DenseRaster<f64>>> {
        match self {
            RasterSource::File(path) => Ok(Arc::new(geo::raster::io::read_raster::<f64>(path)?)),
            RasterSource::Memory(raster) => Ok(Arc::clone(raster)),
        }
    }
}

impl From<PathBuf> for RasterSource {
    fn from(path: PathBuf) -> Self {
        RasterSource::File(path)
    }
}

impl From<&Path> for RasterSource {
    fn from(path: &Path) -> Self {
        RasterSource::File(path.to_path_buf())
    }
}

impl From<DenseRaster<f64>> for RasterSource {
    fn from(raster: DenseRaster<f64>) -> Self {
        RasterSource::Memory(Arc::new(raster))
    }
}

/// Vector input of the pipeline, never modified
#[derive(Clone, Debug)]
pub enum VectorSource {
    File(PathBuf),
    Memory(Arc<VectorDataset>),
}

impl VectorSource {
    pub fn load(&self) -> Result<Arc<VectorDataset>> {
        match self {
            VectorSource::File(path) => Ok(Arc::new(geo::vector::io::read_vector_dataset(path)?)),
            VectorSource::Memory(dataset) => Ok(Arc::clone(dataset)),
        }
    }
}

impl From<PathBuf> for VectorSource {
    fn from(path: PathBuf) -> Self {
        VectorSource::File(path)
    }
}

impl From<&Path> for VectorSource {
    fn from(path: &Path) -> Self {
        VectorSource::File(path.to_path_buf())
    }
}

impl From<VectorDataset> for VectorSource {
    fn from(dataset: VectorDataset) -> Self {
        VectorSource::Memory(Arc::new(dataset))
    }
}

/// Destination of the pipeline result
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputSink {
    #[default]
    Memory,
    File { path: PathBuf, format: VectorFormat },
}

impl OutputSink {
    /// File output, the format follows from the extension (`.shp` or `.geojson`)
    pub fn file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = VectorFormat::for_output(&path)?;
        Ok(OutputSink::File { path, format })
    }
}

/// A single run of the coverage pipeline
#[derive(Clone, Debug)]
pub struct Job {
    pub raster: RasterSource,
    pub grid: VectorSource,
    pub clip: Option<VectorSource>,
    /// Binarize the raster when present
    pub threshold: Option<f64>,
    pub operations: Vec<Operation>,
    /// Nodata value of the clipped raster
    pub clip_nodata: Option<f64>,
    pub output: OutputSink,
}

#[bon]
impl Job {
    #[builder]
    pub fn new(
        #[builder(into)] raster: RasterSource,
        #[builder(into)] grid: VectorSource,
        #[builder(into)] clip: Option<VectorSource>,
        threshold: Option<f64>,
        #[builder(default = vec![Operation::default()])] operations: Vec<Operation>,
        clip_nodata: Option<f64>,
        #[builder(default)] output: OutputSink,
    ) -> Self {
        Job {
            raster,
            grid,
            clip,
            threshold,
            operations,
            clip_nodata,
            output,
        }
    }
}
