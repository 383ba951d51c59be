use finhealth_core::config::EngineConfig;
use log::debug;

use crate::input::file;

/// Load the engine configuration from `path`, or the built-in FY 2025-26
/// tables when no path is given. The result is validated before use.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(p) => {
            debug!("loading configuration from {p}");
            file::read_document::<EngineConfig>(p)?
        }
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
