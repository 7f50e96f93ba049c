use bon::bon;

use crate::Result;
use crate::gdalinterop;

/// Process wide GDAL settings, apply once before doing any IO
pub struct RuntimeConfiguration {
    gdal_config: gdalinterop::Config,
}

#[bon]
impl RuntimeConfiguration {
    #[builder]
    pub fn new(#[builder(default)] config_options: Vec<(String, String)>, gdal_debug_log: Option<bool>) -> Self {
        Self {
            gdal_config: gdalinterop::Config {
                debug_logging: gdal_debug_log.unwrap_or(false),
                config_options,
            },
        }
    }

    pub fn apply(&self) -> Result<()> {
        self.gdal_config.apply()?;
        Ok(())
    }
}
