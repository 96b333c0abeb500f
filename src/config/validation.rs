//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::timing::{speed_to_tick_period, MIN_DELTA_TICKS};
use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Every channel speed is nonzero
/// - Every channel speed is expressible as a 16-bit tick period
/// - No channel is faster than one pulse per `MIN_DELTA_TICKS`
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (name, channel) in config.channels.iter() {
        validate_channel(name.as_str(), channel)?;
    }

    Ok(())
}

fn validate_channel(_name: &str, config: &super::ChannelConfig) -> Result<()> {
    let speed = config.max_speed_steps_per_sec;

    let period = match speed_to_tick_period(speed) {
        Some(p) => p,
        None => return Err(Error::Config(ConfigError::InvalidMaxSpeed(speed))),
    };

    if (period as u32) < MIN_DELTA_TICKS {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(speed)));
    }

    Ok(())
}
