//! Fixed-size channel registry.
//!
//! One queue instance per stepper channel, addressable by index. The
//! registry is owned by the application context and handles are passed
//! explicitly; there is no ambient global lookup.

use embedded_hal::digital::OutputPin;

use crate::backend::QueueBackend;
use crate::channel::Channel;
use crate::config::SystemConfig;
use crate::error::{ConfigError, Error, Result};

/// Fixed set of independent queue channels, indexed `0..NCH`.
///
/// Generic over:
/// - `B`: hardware backend type shared by all channels
/// - `DIR`: DIR pin type
/// - `QN`: per-channel queue capacity
/// - `NCH`: number of channel slots (platform constant)
pub struct QueueRegistry<B, DIR, const QN: usize, const NCH: usize>
where
    B: QueueBackend,
    DIR: OutputPin,
{
    channels: [Option<Channel<B, DIR, QN>>; NCH],
}

impl<B, DIR, const QN: usize, const NCH: usize> QueueRegistry<B, DIR, QN, NCH>
where
    B: QueueBackend,
    DIR: OutputPin,
{
    /// Create a registry with all channel slots empty.
    pub fn new() -> Self {
        Self {
            channels: core::array::from_fn(|_| None),
        }
    }

    /// Number of channel slots.
    #[inline]
    pub const fn len(&self) -> usize {
        NCH
    }

    /// Whether no channel is attached.
    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(|c| c.is_none())
    }

    /// Number of attached channels.
    pub fn attached_count(&self) -> usize {
        self.channels.iter().filter(|c| c.is_some()).count()
    }

    /// Attach a channel at a slot index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is outside `0..NCH`.
    pub fn attach(&mut self, index: usize, channel: Channel<B, DIR, QN>) -> Result<()> {
        let slot = self
            .channels
            .get_mut(index)
            .ok_or(Error::Config(ConfigError::ChannelIndexOutOfRange(index)))?;
        *slot = Some(channel);
        Ok(())
    }

    /// Build a channel from a named configuration and attach it.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the name does not
    /// exist in the configuration.
    pub fn register_channel(
        &mut self,
        index: usize,
        name: &str,
        config: &SystemConfig,
        backend: B,
    ) -> Result<()> {
        let channel_config = config.channel(name).ok_or_else(|| {
            Error::Config(ConfigError::ChannelNotFound(
                heapless::String::try_from(name).unwrap_or_default(),
            ))
        })?;

        self.attach(index, Channel::from_config(channel_config, backend))
    }

    /// Detach and return the channel at an index.
    pub fn detach(&mut self, index: usize) -> Option<Channel<B, DIR, QN>> {
        self.channels.get_mut(index).and_then(|slot| slot.take())
    }

    /// Get the channel at an index.
    pub fn channel(&self, index: usize) -> Option<&Channel<B, DIR, QN>> {
        self.channels.get(index).and_then(|slot| slot.as_ref())
    }

    /// Get the channel at an index, mutably.
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut Channel<B, DIR, QN>> {
        self.channels.get_mut(index).and_then(|slot| slot.as_mut())
    }
}

impl<B, DIR, const QN: usize, const NCH: usize> Default for QueueRegistry<B, DIR, QN, NCH>
where
    B: QueueBackend,
    DIR: OutputPin,
{
    fn default() -> Self {
        Self::new()
    }
}
