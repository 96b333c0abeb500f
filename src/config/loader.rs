//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load and validate a channel configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the TOML does not parse,
/// or a channel fails validation.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_queue::load_config;
///
/// let config = load_config("channels.toml")?;
/// let pan = config.channel("pan").expect("missing channel");
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse and validate a channel configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or a channel fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;
    Ok(config)
}
