//! INI configuration of batch runs, one section per site:
//!
//! ```ini
//! [site-1]
//! raster_ndvi = C:\data\ndvi.tif
//! vector_grid = C:\data\grid.geojson
//! vector_clip = C:\data\clip.geojson
//! vector_output = C:\data\output.geojson
//! threshold = 0.3
//! ```
//!
//! A `[DEFAULT]` section provides fallback values for all sites, key names are case insensitive.

use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption, Properties};

use crate::{Error, Job, OutputSink, Result};

const DEFAULT_SECTION: &str = "DEFAULT";

pub const RASTER_KEY: &str = "raster_ndvi";
pub const GRID_KEY: &str = "vector_grid";
pub const CLIP_KEY: &str = "vector_clip";
pub const OUTPUT_KEY: &str = "vector_output";
pub const THRESHOLD_KEY: &str = "threshold";

/// Nodata value of the clipped raster in batch runs
pub const CLIP_NODATA: f64 = 0.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub name: String,
    pub raster: PathBuf,
    pub grid: PathBuf,
    pub clip: PathBuf,
    pub output: PathBuf,
    pub threshold: f64,
}

impl SiteConfig {
    /// The pipeline job of the site, the raster is always clipped and binarized.
    /// Fails when the output extension is not supported.
    pub fn job(&self) -> Result<Job> {
        Ok(Job::builder()
            .raster(self.raster.clone())
            .grid(self.grid.clone())
            .clip(self.clip.clone())
            .threshold(self.threshold)
            .clip_nodata(CLIP_NODATA)
            .output(OutputSink::file(&self.output)?)
            .build())
    }
}

fn parse_options() -> ParseOption {
    // keep windows paths verbatim
    ParseOption {
        enabled_escape: false,
        enabled_quote: false,
        ..Default::default()
    }
}

/// Loads all the sites of the configuration file, in file order.
/// Every site is validated, an error is returned when any of the sites is invalid.
pub fn load_sites(path: &Path) -> Result<Vec<SiteConfig>> {
    if !path.is_file() {
        return Err(Error::Geo(geo::Error::InvalidPath(path.to_path_buf())));
    }

    sites_from_ini(&Ini::load_from_file_opt(path, parse_options())?)
}

pub fn parse_sites(contents: &str) -> Result<Vec<SiteConfig>> {
    sites_from_ini(&Ini::load_from_str_opt(contents, parse_options())?)
}

fn sites_from_ini(ini: &Ini) -> Result<Vec<SiteConfig>> {
    let mut defaults: Option<&Properties> = None;
    let mut sections: Vec<(&str, &Properties)> = Vec::new();

    for (name, props) in ini.iter() {
        match name {
            None => {
                if let Some((key, _)) = props.iter().next() {
                    return Err(Error::Config(format!("Key '{key}' is not part of a section")));
                }
            }
            Some(DEFAULT_SECTION) => defaults = Some(props),
            Some(name) => {
                if sections.iter().any(|(existing, _)| *existing == name) {
                    return Err(Error::Config(format!("Duplicate section [{name}]")));
                }
                sections.push((name, props));
            }
        }
    }

    sections
        .into_iter()
        .map(|(name, props)| site_from_section(name, props, defaults))
        .collect()
}

fn site_from_section(name: &str, props: &Properties, defaults: Option<&Properties>) -> Result<SiteConfig> {
    let value = |key| required_value(name, props, defaults, key);

    let threshold = value(THRESHOLD_KEY)?;
    Ok(SiteConfig {
        name: name.to_string(),
        raster: PathBuf::from(value(RASTER_KEY)?),
        grid: PathBuf::from(value(GRID_KEY)?),
        clip: PathBuf::from(value(CLIP_KEY)?),
        output: PathBuf::from(value(OUTPUT_KEY)?),
        threshold: threshold.parse().map_err(|_| Error::InvalidThreshold {
            section: name.to_string(),
            value: threshold.to_string(),
        })?,
    })
}

fn required_value<'a>(section: &str, props: &'a Properties, defaults: Option<&'a Properties>, key: &str) -> Result<&'a str> {
    lookup(props, key)
        .or_else(|| defaults.and_then(|defaults| lookup(defaults, key)))
        .ok_or_else(|| Error::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
        })
}

fn lookup<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props
        .iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(key))
        .map(|(_, value)| value.trim())
}
