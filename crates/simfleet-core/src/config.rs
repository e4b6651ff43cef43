//! Persistent configuration for simfleet.
//!
//! Stores user settings in `~/.simfleet/config.json`. The primary use case
//! is recording a default platform so that callers (the CLI in particular)
//! do not have to name one on every invocation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

const CONFIG_FILENAME: &str = "config.json";

/// Returns the simfleet state directory (`~/.simfleet`), creating it if
/// needed.
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn simfleet_dir() -> PathBuf {
    let dir = dirs::home_dir()
        .expect("Could not determine home directory")
        .join(".simfleet");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Persistent simfleet configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FleetConfig {
    /// Platform assumed when a caller does not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_platform: Option<Platform>,
}

impl FleetConfig {
    /// Load config from `~/.simfleet/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        let path = simfleet_dir().join(CONFIG_FILENAME);
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to `~/.simfleet/config.json`.
    pub fn save(&self) -> std::io::Result<()> {
        let path = simfleet_dir().join(CONFIG_FILENAME);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_platform() {
        let config = FleetConfig::default();
        assert!(config.default_platform.is_none());
    }

    #[test]
    fn roundtrip_serialization() {
        let config = FleetConfig {
            default_platform: Some(Platform::TvOs),
        };
        let json = serde_json::to_string(&config).unwrap();
        let loaded: FleetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.default_platform, Some(Platform::TvOs));
    }

    #[test]
    fn deserialize_empty_json() {
        let loaded: FleetConfig = serde_json::from_str("{}").unwrap();
        assert!(loaded.default_platform.is_none());
    }

    #[test]
    fn load_returns_default_for_missing_file() {
        // FleetConfig::load() should not panic even if the file is absent.
        let config = FleetConfig::load();
        let _ = config;
    }
}
