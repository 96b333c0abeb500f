//! Per-channel configuration.

use serde::Deserialize;

use super::timing::{speed_to_tick_period, DEFAULT_MAX_SPEED_TICKS};

/// Configuration for a single stepper channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    /// Human-readable channel name.
    pub name: heapless::String<32>,

    /// Whether a high direction-pin level means the position counts up.
    #[serde(default = "default_true")]
    pub dir_high_counts_up: bool,

    /// Maximum speed in steps per second.
    #[serde(default = "default_max_speed")]
    pub max_speed_steps_per_sec: u32,

    /// Forward planning horizon in milliseconds.
    ///
    /// Not used by the queue itself; carried for the ramp planner above it,
    /// which refills whenever buffered execution time drops below this.
    #[serde(default = "default_planning_ms")]
    pub forward_planning_ms: u16,
}

fn default_true() -> bool {
    true
}

fn default_max_speed() -> u32 {
    1_000
}

fn default_planning_ms() -> u16 {
    20
}

impl ChannelConfig {
    /// Maximum speed expressed as the shortest permitted tick period.
    ///
    /// Falls back to the crate default when the configured speed cannot be
    /// expressed; [`validate_config`] rejects such configurations up front.
    ///
    /// [`validate_config`]: super::validate_config
    pub fn max_speed_in_ticks(&self) -> u16 {
        speed_to_tick_period(self.max_speed_steps_per_sec).unwrap_or(DEFAULT_MAX_SPEED_TICKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_speed_in_ticks() {
        let config = ChannelConfig {
            name: heapless::String::try_from("x_axis").unwrap(),
            dir_high_counts_up: true,
            max_speed_steps_per_sec: 4_000,
            forward_planning_ms: 20,
        };
        assert_eq!(config.max_speed_in_ticks(), 4_000);
    }
}
