use std::path::PathBuf;

use clap::Parser;
use env_logger::{Env, TimestampPrecision};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[clap(
    name = "quadrat-coverage",
    version,
    about = "Calculate the percent coverage of quadrats based on a thresholded raster"
)]
pub struct Opt {
    /// INI file with one section per site (raster_ndvi, vector_grid, vector_clip, vector_output, threshold)
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Enable GDAL debug logging
    #[arg(long = "gdal-debug")]
    pub gdal_debug: bool,
}

fn main() -> Result<()> {
    let opt = match Opt::try_parse() {
        Ok(opt) => opt,
        Err(err) if err.use_stderr() => {
            eprintln!("Usage: quadrat-coverage INPUT_FILE");
            eprintln!("{err}");
            std::process::exit(1);
        }
        // --help and --version
        Err(err) => err.exit(),
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    geo::RuntimeConfiguration::builder()
        .gdal_debug_log(opt.gdal_debug)
        .build()
        .apply()?;

    let site_count = coverage::batch::run_batch(&opt.input, &mut std::io::stdout().lock())?;
    log::info!("Processed {site_count} sites");

    Ok(())
}
