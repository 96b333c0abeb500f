//! Error types for stepper-queue library.
//!
//! Provides unified error handling across configuration and queue operations.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-queue operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Command queue enqueue error
    Enqueue(EnqueueError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Channel name not found in configuration
    ChannelNotFound(heapless::String<32>),
    /// Channel index outside the registry's fixed range
    ChannelIndexOutOfRange(usize),
    /// Invalid maximum speed (zero, or faster than one pulse per
    /// `MIN_DELTA_TICKS`, or a tick period that does not fit in 16 bits)
    InvalidMaxSpeed(u32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Enqueue failures returned by [`add_queue_entry`].
///
/// All variants are ordinary recoverable results; nothing is thrown across
/// the producer/consumer boundary.
///
/// [`add_queue_entry`]: crate::channel::Channel::add_queue_entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueError {
    /// Queue occupancy equals capacity; transient backpressure, retry on the
    /// next planning tick.
    QueueFull,
    /// `ticks * max(steps, 1)` is below [`MIN_CMD_TICKS`]; the command is too
    /// short for the timing mechanism to honor. A caller-side planning bug,
    /// not to be retried as-is.
    ///
    /// [`MIN_CMD_TICKS`]: crate::config::timing::MIN_CMD_TICKS
    TicksTooLow,
    /// A start was requested with nothing committed in the queue.
    EmptyQueueToStart,
    /// The backend cannot accept a commit right now; retry shortly. If
    /// persistent, this indicates a backend-level fault.
    DeviceNotReady,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Enqueue(e) => write!(f, "Enqueue error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::ChannelNotFound(name) => write!(f, "Channel '{}' not found", name),
            ConfigError::ChannelIndexOutOfRange(idx) => {
                write!(f, "Channel index {} out of range", idx)
            }
            ConfigError::InvalidMaxSpeed(v) => {
                write!(f, "Invalid max speed: {} steps/s", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for EnqueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnqueueError::QueueFull => write!(f, "Queue is full"),
            EnqueueError::TicksTooLow => write!(f, "Command ticks below minimum"),
            EnqueueError::EmptyQueueToStart => write!(f, "Cannot start an empty queue"),
            EnqueueError::DeviceNotReady => write!(f, "Device not ready for commands"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<EnqueueError> for Error {
    fn from(e: EnqueueError) -> Self {
        Error::Enqueue(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for EnqueueError {}
