//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::channel::ChannelConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named channel configurations.
    pub channels: FnvIndexMap<String<32>, ChannelConfig, 8>,
}

impl SystemConfig {
    /// Get a channel configuration by name.
    pub fn channel(&self, name: &str) -> Option<&ChannelConfig> {
        self.channels
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all channel names.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(|s| s.as_str())
    }

    /// Number of configured channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channels: FnvIndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_key_not_display_name() {
        let config: SystemConfig = toml::from_str(
            r#"
[channels.pan]
name = "Pan Axis"
"#,
        )
        .unwrap();

        assert_eq!(config.channel_count(), 1);
        assert!(config.channel("pan").is_some());
        // the display name is not a lookup key
        assert!(config.channel("Pan Axis").is_none());
        assert_eq!(config.channel_names().next(), Some("pan"));
    }
}
