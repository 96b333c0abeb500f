//! Configuration module for stepper-queue.
//!
//! Provides types for loading and validating per-channel queue configuration
//! from TOML files (with `std` feature) or pre-parsed data.

mod channel;
mod system;
pub mod timing;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use channel::ChannelConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export the tick constants at config level
pub use timing::{MIN_CMD_TICKS, MIN_DELTA_TICKS, TICKS_PER_S};
