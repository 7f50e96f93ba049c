//! The coverage pipeline shared by the interactive and batch entries:
//! clip, binarize, aggregate and write the result to the requested sink.

use std::{path::PathBuf, sync::Arc};

use geo::{
    raster::{DenseRaster, algo},
    vector::{VectorDataset, geometry},
    zonal,
};
use geo_types::{MultiPolygon, Polygon};

use crate::{Error, Job, OutputSink, Result};

/// Where the result of a job ended up
#[derive(Debug, PartialEq)]
pub enum PipelineOutput {
    Memory(VectorDataset),
    File(PathBuf),
}

/// Runs the job and stores the result in the output sink of the job
pub fn run_job(job: &Job) -> Result<PipelineOutput> {
    let result = compute_coverage(job)?;

    match &job.output {
        OutputSink::Memory => Ok(PipelineOutput::Memory(result)),
        OutputSink::File { path, format } => {
            geo::vector::io::write_vector_dataset(&result, path, *format)?;
            log::info!("Coverage written to {}", path.display());
            Ok(PipelineOutput::File(path.clone()))
        }
    }
}

/// Computes the coverage statistics of the job, the result has one feature per grid feature
/// and uses the projection of the grid
pub fn compute_coverage(job: &Job) -> Result<VectorDataset> {
    let grid = job.grid.load()?;
    let mut raster = job.raster.load()?;

    if let Some(clip) = &job.clip {
        let polygons = clip_polygons(clip.load()?.as_ref(), raster.metadata().projection())?;
        raster = Arc::new(algo::clip_to_polygons(raster.as_ref(), &polygons, job.clip_nodata)?);
    }

    let raster: &DenseRaster<f64> = raster.as_ref();
    let result = match job.threshold {
        Some(threshold) => zonal::zonal_statistics(&algo::binarize(raster, threshold), &grid, &job.operations)?,
        None => zonal::zonal_statistics(raster, &grid, &job.operations)?,
    };

    Ok(result)
}

/// The polygons of the clip dataset expressed in the raster projection, other geometries are ignored
fn clip_polygons(clip: &VectorDataset, raster_projection: &str) -> Result<MultiPolygon<f64>> {
    let mut parts: Vec<Polygon<f64>> = Vec::new();
    for feature in clip.iter() {
        match geometry::polygons(&feature.geometry) {
            Some(multi) => parts.extend(multi.0),
            None => log::warn!("Ignoring non polygon clip geometry (fid: {:?})", feature.id),
        }
    }

    if parts.is_empty() {
        return Err(Error::Geo(geo::Error::InvalidArgument(
            "The clip dataset does not contain any polygons".into(),
        )));
    }

    let polygons = MultiPolygon::new(parts);
    if clip.projection.is_empty() || raster_projection.is_empty() {
        if clip.projection != raster_projection {
            log::warn!("Clip dataset or raster has no projection, clip coordinates are used as is");
        }

        return Ok(polygons);
    }

    Ok(geo::srs::reproject_multi_polygon(polygons, &clip.projection, raster_projection)?)
}

/// Convenience for callers that only have an in-memory raster
pub fn coverage_of_raster(raster: DenseRaster<f64>, grid: VectorDataset, threshold: Option<f64>) -> Result<VectorDataset> {
    compute_coverage(&Job::builder().raster(raster).grid(grid).maybe_threshold(threshold).build())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::zonal::{Operation, Statistic};

    use super::*;
    use crate::testutils::{grid_of, half_clip, left_half, rect_polygon, right_half, uniform_raster, whole_extent};

    fn mean(result: &VectorDataset, index: usize) -> f64 {
        result.features[index].attribute("mean").expect("mean value")
    }

    #[test]
    fn threshold_below_the_values() -> Result<()> {
        let result = coverage_of_raster(uniform_raster(0.5), grid_of(vec![whole_extent()]), Some(0.3))?;
        assert_relative_eq!(mean(&result, 0), 1.0);
        Ok(())
    }

    #[test]
    fn threshold_above_the_values() -> Result<()> {
        let result = coverage_of_raster(uniform_raster(0.5), grid_of(vec![whole_extent()]), Some(0.6))?;
        assert_relative_eq!(mean(&result, 0), 0.0);
        Ok(())
    }

    #[test]
    fn without_threshold_the_raw_values_are_aggregated() -> Result<()> {
        let result = coverage_of_raster(uniform_raster(0.5), grid_of(vec![whole_extent()]), None)?;
        assert_relative_eq!(mean(&result, 0), 0.5);
        Ok(())
    }

    #[test]
    fn clipped_area_reports_zero() -> Result<()> {
        let job = Job::builder()
            .raster(uniform_raster(0.5))
            .grid(grid_of(vec![left_half(), right_half()]))
            .clip(half_clip())
            .threshold(0.3)
            .clip_nodata(0.0)
            .build();

        let result = compute_coverage(&job)?;
        assert_relative_eq!(mean(&result, 0), 1.0);
        assert_relative_eq!(mean(&result, 1), 0.0);
        Ok(())
    }

    #[test_log::test]
    fn clip_in_another_projection_is_reprojected() -> Result<()> {
        let meta = geo::GeoReference::with_top_left(
            "EPSG:4326",
            geo::RasterSize::with_rows_cols(10, 10),
            geo::Point::new(0.0, 10.0),
            geo::CellSize::square(1.0),
            None,
        );

        // web mercator meters, the right edge is the 5 degrees meridian
        let mut clip = grid_of(vec![rect_polygon(-100_000.0, -100_000.0, 556_597.453_966_367_8, 1_300_000.0)]);
        clip.projection = "EPSG:3857".to_string();

        let job = Job::builder()
            .raster(DenseRaster::filled_with(meta, 0.5))
            .grid(grid_of(vec![left_half(), right_half()]))
            .clip(clip)
            .threshold(0.3)
            .clip_nodata(0.0)
            .build();

        let result = compute_coverage(&job)?;
        assert_relative_eq!(mean(&result, 0), 1.0);
        assert_relative_eq!(mean(&result, 1), 0.0);
        Ok(())
    }

    #[test]
    fn output_has_one_feature_per_grid_feature() -> Result<()> {
        let mut grid = grid_of(vec![left_half(), whole_extent(), right_half()]);
        grid.projection = "EPSG:32756".to_string();

        let job = Job::builder()
            .raster(uniform_raster(0.5))
            .grid(grid.clone())
            .clip(half_clip())
            .threshold(0.3)
            .operations(vec![Operation::new(Statistic::Sum), Operation::default()])
            .build();

        let result = compute_coverage(&job)?;
        assert_eq!(result.len(), grid.len());
        assert_eq!(result.projection, grid.projection);
        for (res, input) in result.iter().zip(grid.iter()) {
            assert_eq!(res.geometry, input.geometry);
        }
        assert_eq!(result.field_names(), vec!["sum", "mean"]);
        // only the cells of the clipped raster take part
        assert_relative_eq!(mean(&result, 1), 1.0);
        assert_relative_eq!(result.features[1].attribute("sum").expect("sum"), 50.0);

        Ok(())
    }

    #[test]
    fn memory_sink() -> Result<()> {
        let job = Job::builder().raster(uniform_raster(0.5)).grid(grid_of(vec![whole_extent()])).build();
        assert!(matches!(run_job(&job)?, PipelineOutput::Memory(result) if result.len() == 1));
        Ok(())
    }

    #[test]
    fn clip_without_polygons_is_an_error() {
        let job = Job::builder()
            .raster(uniform_raster(0.5))
            .grid(grid_of(vec![whole_extent()]))
            .clip(VectorDataset::default())
            .build();
        assert!(compute_coverage(&job).is_err());
    }
}
