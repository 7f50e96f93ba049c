//! Turns the layer selection of the interactive dialog into a pipeline job.

use crate::{
    Error, Job, OutputSink, Result,
    session::{LayerId, LayerInfo, LayerKind, LayerRegistry},
};

/// The layers that can be chosen for every role in the selection dialog
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerCandidates {
    pub grid: Vec<LayerInfo>,
    pub raster: Vec<LayerInfo>,
    pub clip: Vec<LayerInfo>,
}

impl LayerCandidates {
    pub fn from_registry(registry: &impl LayerRegistry) -> Self {
        let (raster, vector): (Vec<_>, Vec<_>) = registry
            .layers()
            .into_iter()
            .partition(|layer| layer.kind == LayerKind::Raster);

        LayerCandidates {
            grid: vector.clone(),
            raster,
            clip: vector,
        }
    }
}

/// The choices made in the selection dialog
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerSelection {
    pub grid: Option<LayerId>,
    pub raster: Option<LayerId>,
    pub clip: Option<LayerId>,
    /// Threshold as entered by the user, may be empty
    pub threshold: String,
}

/// Empty or unparsable text means no threshold
pub fn parse_threshold(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    match text.parse::<f64>() {
        Ok(threshold) => Some(threshold),
        Err(_) => {
            log::debug!("Ignoring invalid threshold: '{text}'");
            None
        }
    }
}

/// Builds the job for the selected layers, the result is kept in memory
pub fn collect_job(registry: &impl LayerRegistry, selection: &LayerSelection) -> Result<Job> {
    let (Some(grid_id), Some(raster_id)) = (selection.grid, selection.raster) else {
        return Err(Error::MissingSelection);
    };

    let grid = registry.vector_source(grid_id).ok_or(Error::LayerNotFound(grid_id))?;
    let raster = registry.raster_source(raster_id).ok_or(Error::LayerNotFound(raster_id))?;
    let clip = selection
        .clip
        .map(|clip_id| registry.vector_source(clip_id).ok_or(Error::LayerNotFound(clip_id)))
        .transpose()?;

    Ok(Job::builder()
        .raster(raster)
        .grid(grid)
        .maybe_clip(clip)
        .maybe_threshold(parse_threshold(&selection.threshold))
        .output(OutputSink::Memory)
        .build())
}
