//! Batch entry: runs the coverage pipeline for every site of an INI configuration file.

use std::{io::Write, path::Path};

use crate::{Job, Result, config, pipeline};

/// Processes all sites of the configuration file in file order, progress is reported on `out`.
///
/// All sites are validated (required keys, threshold, output format) before the first site is processed.
/// The first failing site aborts the run.
pub fn run_batch(config_path: &Path, out: &mut impl Write) -> Result<usize> {
    let sites = config::load_sites(config_path)?;
    let jobs = sites
        .iter()
        .map(|site| -> Result<(String, Job)> { Ok((site.name.clone(), site.job()?)) })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Loaded {} sites from {}", jobs.len(), config_path.display());

    for (name, job) in &jobs {
        writeln!(out, "Processing site: {name}")?;
        pipeline::run_job(job)?;
    }

    writeln!(out, "Processing complete.")?;
    Ok(jobs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn invalid_site_aborts_before_processing() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let config = tmp.path().join("sites.ini");
        std::fs::write(
            &config,
            "[a]\nraster_ndvi = missing.tif\nvector_grid = g.geojson\nvector_clip = c.geojson\nvector_output = a.geojson\nthreshold = 0.3\n\n[b]\nraster_ndvi = missing.tif\n",
        )?;

        let mut out = Vec::new();
        let err = run_batch(&config, &mut out).expect_err("site b is incomplete");
        assert!(matches!(err, Error::MissingKey { section, .. } if section == "b"));
        assert!(out.is_empty());

        Ok(())
    }

    #[test]
    fn unsupported_output_aborts_before_processing() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let config = tmp.path().join("sites.ini");
        let output = tmp.path().join("out.csv");
        std::fs::write(
            &config,
            format!(
                "[a]\nraster_ndvi = missing.tif\nvector_grid = g.geojson\nvector_clip = c.geojson\nvector_output = {}\nthreshold = 0.3\n",
                output.display()
            ),
        )?;

        let mut out = Vec::new();
        assert!(run_batch(&config, &mut out).is_err());
        assert!(out.is_empty());
        assert!(!output.exists());

        Ok(())
    }

    #[test]
    fn empty_configuration() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let config = tmp.path().join("sites.ini");
        std::fs::write(&config, "; no sites yet\n")?;

        let mut out = Vec::new();
        assert_eq!(run_batch(&config, &mut out)?, 0);
        assert_eq!(String::from_utf8_lossy(&out), "Processing complete.\n");

        Ok(())
    }
}
