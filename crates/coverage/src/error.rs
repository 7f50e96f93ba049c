use thiserror::Error;

use crate::session::LayerId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Please select both a vector and raster layer.")]
    MissingSelection,
    #[error("Layer {0} is not available or has the wrong type")]
    LayerNotFound(LayerId),
    #[error("Missing key '{key}' in section [{section}]")]
    MissingKey { section: String, key: String },
    #[error("Invalid threshold '{value}' in section [{section}]")]
    InvalidThreshold { section: String, value: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to create memory layer from the result.")]
    InvalidResultLayer,
    #[error(transparent)]
    Geo(#[from] geo::Error),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to read configuration file: {0}")]
    Ini(#[from] ini::Error),
    #[error("Failed to parse configuration: {0}")]
    IniParse(#[from] ini::ParseError),
}
