//! The Apple platforms this crate discovers devices for.
//!
//! A [`Platform`] carries both the token that the simulator catalog uses in
//! its section headers (`iOS`, `tvOS`, `watchOS`) and the USB device-class
//! name fragments that identify connected hardware of that platform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An Apple mobile platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    TvOs,
    WatchOs,
}

impl Platform {
    /// The platform token as it appears in simulator catalog section headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::TvOs => "tvOS",
            Platform::WatchOs => "watchOS",
        }
    }

    /// USB device-class name fragments for connected hardware of this
    /// platform. An empty slice means no hardware of this platform can be
    /// attached over USB, so connected-device discovery short-circuits.
    pub fn device_classes(self) -> &'static [&'static str] {
        match self {
            Platform::Ios => &["iPhone", "iPad"],
            Platform::TvOs => &["AppleTV"],
            Platform::WatchOs => &[],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string did not name a known platform.
#[derive(Error, Debug)]
#[error("unknown platform {0:?}, expected iOS, tvOS, or watchOS")]
pub struct ParsePlatformError(String);

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "tvos" => Ok(Platform::TvOs),
            "watchos" => Ok(Platform::WatchOs),
            _ => Err(ParsePlatformError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_tokens() {
        assert_eq!(Platform::Ios.as_str(), "iOS");
        assert_eq!(Platform::TvOs.as_str(), "tvOS");
        assert_eq!(Platform::WatchOs.as_str(), "watchOS");
    }

    #[test]
    fn test_device_classes() {
        assert_eq!(Platform::Ios.device_classes(), &["iPhone", "iPad"]);
        assert_eq!(Platform::TvOs.device_classes(), &["AppleTV"]);
        assert!(Platform::WatchOs.device_classes().is_empty());
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("tvos".parse::<Platform>().unwrap(), Platform::TvOs);
        assert_eq!("WATCHOS".parse::<Platform>().unwrap(), Platform::WatchOs);
        assert!("android".parse::<Platform>().is_err());
    }

    #[test]
    fn test_serde_representation() {
        assert_eq!(serde_json::to_string(&Platform::TvOs).unwrap(), "\"tvos\"");
        let platform: Platform = serde_json::from_str("\"ios\"").unwrap();
        assert_eq!(platform, Platform::Ios);
    }
}
