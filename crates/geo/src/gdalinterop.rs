//! Glue between GDAL and the rest of the crate: error routing, pointer checks and path helpers.

use std::path::Path;

use gdal::{cpl::CslStringList, errors::GdalError};

use crate::Result;

pub const TRUE: std::ffi::c_int = 1;

pub struct Config {
    pub debug_logging: bool,
    pub config_options: Vec<(String, String)>,
}

impl Config {
    pub fn apply(&self) -> Result<()> {
        setup_logging(self.debug_logging);
        for (key, value) in &self.config_options {
            gdal::config::set_config_option(key, value)?;
        }

        Ok(())
    }
}

/// Routes the GDAL diagnostics to the `log` facade
pub fn setup_logging(debug: bool) {
    if debug && gdal::config::set_config_option("CPL_DEBUG", "ON").is_err() {
        log::debug!("Failed to set GDAL debug level")
    }

    gdal::config::set_error_handler(|sev, _ec, msg| {
        use gdal::errors::CplErrType;
        match sev {
            CplErrType::Debug => log::debug!("GDAL: {msg}"),
            CplErrType::Warning => log::warn!("GDAL: {msg}"),
            CplErrType::Failure | CplErrType::Fatal => log::error!("GDAL: {msg}"),
            CplErrType::None => {}
        }
    });
}

pub fn create_string_list(options: &[String]) -> Result<CslStringList> {
    let mut result = CslStringList::new();
    for opt in options {
        result.add_string(opt)?;
    }

    Ok(result)
}

pub fn check_pointer<T>(ptr: *mut T, method_name: &'static str) -> std::result::Result<*mut T, GdalError> {
    if ptr.is_null() {
        let msg = last_error_message();
        unsafe { gdal_sys::CPLErrorReset() };
        Err(GdalError::NullPointer { method_name, msg })
    } else {
        Ok(ptr)
    }
}

pub fn create_output_directory_if_needed(p: &Path) -> Result {
    if p.starts_with("/vsi") {
        // gdal virtual filesystem path
        return Ok(());
    }

    match p.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => std::fs::create_dir_all(parent)?,
        _ => {}
    }

    Ok(())
}

fn last_error_message() -> String {
    let raw_ptr = unsafe { gdal_sys::CPLGetLastErrorMsg() };
    if raw_ptr.is_null() {
        return String::new();
    }

    unsafe { std::ffi::CStr::from_ptr(raw_ptr) }.to_string_lossy().into_owned()
}
