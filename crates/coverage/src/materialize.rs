//! Registers a coverage result as a new layer of the host session.

use std::{io::Write, path::Path};

use geo::vector::{VectorDataset, geojson};

use crate::{
    Error, Result,
    session::{LayerId, LayerRegistry},
};

pub const RESULT_LAYER_NAME: &str = "Quadrat Coverage";

/// Persists the result as a temporary GeoJSON file, reloads it and registers it as a new layer.
/// The layer gets the provided CRS, or the projection of the result when no CRS is provided.
pub fn materialize(registry: &mut impl LayerRegistry, result: &VectorDataset, crs: Option<String>) -> Result<LayerId> {
    materialize_in(registry, result, crs, &std::env::temp_dir())
}

/// [`materialize`] with the temporary file created in `tmp_dir`, the file is removed before returning
pub fn materialize_in(registry: &mut impl LayerRegistry, result: &VectorDataset, crs: Option<String>, tmp_dir: &Path) -> Result<LayerId> {
    let mut tmp = tempfile::Builder::new()
        .prefix("quadrat_coverage")
        .suffix(".geojson")
        .tempfile_in(tmp_dir)?;

    geojson::write_geojson(result, tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;

    let mut layer = geo::vector::io::read_vector_dataset(tmp.path()).map_err(|err| {
        log::error!("Failed to reload the result from {}: {err}", tmp.path().display());
        Error::InvalidResultLayer
    })?;

    if layer.len() != result.len() {
        log::error!("Reloaded result contains {} features, expected {}", layer.len(), result.len());
        return Err(Error::InvalidResultLayer);
    }

    layer.projection = crs.unwrap_or_else(|| result.projection.clone());
    Ok(registry.add_vector_layer(RESULT_LAYER_NAME, layer))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::vector::VectorFeature;
    use geo_types::Geometry;

    use super::*;
    use crate::{
        session::{LayerRegistry, Project},
        testutils::{grid_of, left_half, right_half},
    };

    fn dir_is_empty(path: &Path) -> Result<bool> {
        Ok(std::fs::read_dir(path)?.next().is_none())
    }

    fn coverage_result() -> VectorDataset {
        let mut result = grid_of(vec![left_half(), right_half()]);
        for (feature, mean) in result.features.iter_mut().zip([1.0, 0.0]) {
            feature.attributes.push(("mean".to_string(), Some(mean)));
        }
        result
    }

    #[test_log::test]
    fn result_layer_is_registered() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let mut project = Project::new();

        let id = materialize_in(&mut project, &coverage_result(), Some("EPSG:32756".into()), tmp.path())?;

        assert_eq!(project.layer_by_name(RESULT_LAYER_NAME), Some(id));
        assert_eq!(project.layer_crs(id).as_deref(), Some("EPSG:32756"));
        let layer = project.vector_source(id).expect("vector layer").load()?;
        assert_eq!(layer.len(), 2);
        assert_relative_eq!(layer.features[0].attribute("mean").expect("mean"), 1.0);
        assert!(dir_is_empty(tmp.path())?);

        Ok(())
    }

    #[test_log::test]
    fn temporary_file_is_removed_on_failure() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let mut project = Project::new();
        let points = VectorDataset::new("", vec![VectorFeature::new(None, Geometry::Point(geo_types::Point::new(0.0, 0.0)))]);

        assert!(materialize_in(&mut project, &points, None, tmp.path()).is_err());
        assert!(project.is_empty());
        assert!(dir_is_empty(tmp.path())?);

        Ok(())
    }
}
