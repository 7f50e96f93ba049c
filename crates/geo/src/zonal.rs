//! Exact overlap zonal statistics: every raster cell is weighted by the fraction of its area covered by the polygon.

mod operation;

use geo_types::MultiPolygon;

pub use operation::{Operation, Statistic};

use crate::{
    Error, GeoReference, RasterNum, Result,
    raster::DenseRaster,
    vector::{
        VectorDataset, VectorFeature,
        geometry::{self, coverage_fraction},
    },
};

/// A raster cell value together with the fraction of the cell covered by the polygon
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellCoverage {
    pub value: Option<f64>,
    pub coverage: f64,
}

/// The cells of the raster covered by the polygon, cells without coverage are not included
pub fn covered_cells<T: RasterNum>(raster: &DenseRaster<T>, polygon: &MultiPolygon<f64>) -> Result<Vec<CellCoverage>> {
    let meta = raster.metadata();
    let Some(window) = geometry::bounds(polygon).map(|bounds| meta.cell_window(&bounds)).transpose()?.flatten() else {
        return Ok(Vec::new());
    };

    Ok(window
        .cells()
        .filter_map(|cell| {
            let coverage = coverage_fraction(polygon, &meta.cell_bounds(cell));
            (coverage > 0.0).then(|| CellCoverage {
                value: raster.cell_value(cell).and_then(|v| v.to_f64()),
                coverage,
            })
        })
        .collect())
}

/// Computes the statistic of a single operation over the covered cells
pub fn compute_statistic(op: &Operation, cells: &[CellCoverage]) -> Option<f64> {
    let mut weight = 0.0;
    let mut weighted_sum = 0.0;
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;

    for cell in cells {
        let Some(value) = cell.value.or(op.default_value) else {
            continue;
        };

        weight += cell.coverage;
        weighted_sum += cell.coverage * value;
        min = Some(min.map_or(value, |m| m.min(value)));
        max = Some(max.map_or(value, |m| m.max(value)));
    }

    match op.statistic {
        Statistic::Mean => {
            if weight > 0.0 {
                Some(weighted_sum / weight)
            } else {
                op.default_value
            }
        }
        Statistic::Sum => Some(weighted_sum),
        Statistic::Count => Some(weight),
        Statistic::Min => min.or(op.default_value),
        Statistic::Max => max.or(op.default_value),
    }
}

/// Computes the requested statistics for every polygon of the dataset.
///
/// The result contains one feature per input feature in the same order, with the input geometry
/// and one attribute per operation named after the statistic. The projection of the polygons is kept.
pub fn zonal_statistics<T: RasterNum>(raster: &DenseRaster<T>, polygons: &VectorDataset, operations: &[Operation]) -> Result<VectorDataset> {
    let meta = raster.metadata();
    meta.geo_transform().check_axis_aligned()?;
    warn_on_projection_mismatch(meta, &polygons.projection);

    let features = polygons
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let Some(multi) = geometry::polygons(&feature.geometry) else {
                return Err(Error::InvalidArgument(format!(
                    "Zonal statistics require polygon geometries (feature {})",
                    feature.id.unwrap_or(index as u64)
                )));
            };

            let cells = covered_cells(raster, &multi)?;
            let attributes = operations
                .iter()
                .map(|op| (op.name().to_string(), compute_statistic(op, &cells)))
                .collect();

            Ok(VectorFeature {
                id: feature.id,
                geometry: feature.geometry.clone(),
                attributes,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Computed zonal statistics for {} polygons", features.len());
    Ok(VectorDataset::new(polygons.projection.clone(), features))
}

fn warn_on_projection_mismatch(meta: &GeoReference, projection: &str) {
    if !meta.projection().is_empty() && !projection.is_empty() && meta.projection() != projection {
        log::warn!("The projection of the polygons differs from the raster projection, no reprojection is performed");
    }
}
