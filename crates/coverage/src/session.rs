//! Host GIS session abstraction: the layers that are loaded and the registration of new layers.

use std::fmt;

use geo::vector::VectorDataset;

use crate::{RasterSource, VectorSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub usize);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Raster,
    Vector,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerInfo {
    pub id: LayerId,
    pub name: String,
    pub kind: LayerKind,
}

/// The layers of a host session
pub trait LayerRegistry {
    /// All layers in display order
    fn layers(&self) -> Vec<LayerInfo>;

    /// `None` when the layer does not exist or is not a raster layer
    fn raster_source(&self, id: LayerId) -> Option<RasterSource>;

    /// `None` when the layer does not exist or is not a vector layer
    fn vector_source(&self, id: LayerId) -> Option<VectorSource>;

    /// Coordinate reference system of the layer as WKT or authority string
    fn layer_crs(&self, id: LayerId) -> Option<String>;

    fn add_vector_layer(&mut self, name: &str, dataset: VectorDataset) -> LayerId;
}

#[derive(Clone, Debug)]
enum LayerData {
    Raster(RasterSource),
    Vector(VectorSource),
}

#[derive(Clone, Debug)]
struct ProjectLayer {
    name: String,
    crs: Option<String>,
    data: LayerData,
}

/// In-memory [`LayerRegistry`], layers are kept in insertion order
#[derive(Clone, Debug, Default)]
pub struct Project {
    layers: Vec<ProjectLayer>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_raster(&mut self, name: &str, source: impl Into<RasterSource>, crs: Option<String>) -> LayerId {
        self.push(name, crs, LayerData::Raster(source.into()))
    }

    pub fn add_vector(&mut self, name: &str, source: impl Into<VectorSource>, crs: Option<String>) -> LayerId {
        self.push(name, crs, LayerData::Vector(source.into()))
    }

    /// The id of the last layer with the provided name
    pub fn layer_by_name(&self, name: &str) -> Option<LayerId> {
        self.layers.iter().rposition(|layer| layer.name == name).map(LayerId)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn push(&mut self, name: &str, crs: Option<String>, data: LayerData) -> LayerId {
        self.layers.push(ProjectLayer {
            name: name.to_string(),
            crs,
            data,
        });

        LayerId(self.layers.len() - 1)
    }
}

impl LayerRegistry for Project {
    fn layers(&self) -> Vec<LayerInfo> {
        self.layers
            .iter()
            .enumerate()
            .map(|(index, layer)| LayerInfo {
                id: LayerId(index),
                name: layer.name.clone(),
                kind: match layer.data {
                    LayerData::Raster(_) => LayerKind::Raster,
                    LayerData::Vector(_) => LayerKind::Vector,
                },
            })
            .collect()
    }

    fn raster_source(&self, id: LayerId) -> Option<RasterSource> {
        match &self.layers.get(id.0)?.data {
            LayerData::Raster(source) => Some(source.clone()),
            LayerData::Vector(_) => None,
        }
    }

    fn vector_source(&self, id: LayerId) -> Option<VectorSource> {
        match &self.layers.get(id.0)?.data {
            LayerData::Vector(source) => Some(source.clone()),
            LayerData::Raster(_) => None,
        }
    }

    fn layer_crs(&self, id: LayerId) -> Option<String> {
        self.layers.get(id.0)?.crs.clone()
    }

    fn add_vector_layer(&mut self, name: &str, dataset: VectorDataset) -> LayerId {
        let crs = (!dataset.projection.is_empty()).then(|| dataset.projection.clone());
        self.add_vector(name, dataset, crs)
    }
}
