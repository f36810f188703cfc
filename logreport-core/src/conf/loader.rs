use crate::conf::error::ConfigError;
use crate::conf::types::{Config, ConfigOverrides};

use std::fs;
use std::path::Path;

/// Loads the effective configuration from a JSON config file.
///
/// The file only needs to name the keys it overrides; everything else
/// keeps its built-in default. A missing or unparsable file is a hard
/// failure, matching the rest of the startup path.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let overrides: ConfigOverrides =
        serde_json::from_str(&raw).map_err(|e| ConfigError::parse(path, e))?;

    //--------------------------------------------------------------------------
    // Overlay onto defaults, then validate ranges
    //--------------------------------------------------------------------------
    let config = Config::default().apply(overrides);
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.report_size == 0 {
        return Err(ConfigError::ZeroReportSize);
    }

    if !(0.0..=100.0).contains(&config.critical_perc_err) {
        return Err(ConfigError::InvalidThreshold {
            value: config.critical_perc_err,
        });
    }

    Ok(())
}
