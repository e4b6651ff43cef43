//! Interface to Apple's `xcrun simctl` command-line tool.
//!
//! This module parses the plain-text catalog that `xcrun simctl list
//! devices` prints and wraps the `shutdown` and `erase` subcommands used by
//! simulator reset.
//!
//! The catalog groups device rows under `-- <platform> <version> --`
//! section headers:
//!
//! ```text
//! == Devices ==
//! -- iOS 9.0 --
//!     iPhone 5 (0EDE6AFC-3767-425A-9658-AAA30A60F212) (Shutdown)
//!     iPad Air 2 (4F3B8059-03FD-4D72-99C0-6E9BBEE2A9CE) (Shutdown) (unavailable, device type profile not found)
//! ```
//!
//! Rows carrying an `unavailable` annotation are dropped, as is every row
//! outside the requested platform's sections. Lines that do not look like a
//! device row at all are skipped silently; the catalog contains plenty of
//! noise and best-effort parsing tolerates format drift.
//!
//! # Requirements
//!
//! Xcode must be installed for `xcrun simctl` to be available.

use std::io;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::device::Device;
use crate::platform::Platform;
use crate::runner::CommandRunner;

/// Marker every healthy catalog listing contains. Its absence means the
/// tool itself is broken, not that the device set is empty.
pub const DEVICES_HEADER: &str = "== Devices ==";

/// Errors that can occur when interacting with simctl.
#[derive(Error, Debug)]
pub enum SimctlError {
    /// The catalog listing was missing its expected header.
    #[error("xcrun simctl is not working; run `xcrun simctl list devices` and check its output")]
    ToolUnavailable,

    /// The command could not be spawned or its output captured.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// `<name> (<udid>) (<state>)`, optionally trailed by an unavailable
/// annotation. Group 4 capturing anything marks the row as unavailable.
fn device_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\s+([^(]+) \(([-0-9A-F]+)\) \(([^(]+)\)(.*unavailable.*)?")
            .expect("device row pattern")
    })
}

/// Parse a captured catalog listing into the requested platform's
/// simulator devices.
///
/// Processes the text line by line, carrying the current `(platform,
/// version)` section context; each kept row becomes a [`Device`] with
/// `is_simulator = true` and the section's version as its `os_version`.
/// Result order matches input line order.
///
/// # Errors
///
/// [`SimctlError::ToolUnavailable`] when the listing lacks
/// [`DEVICES_HEADER`]. An empty result for the platform is not an error.
pub fn parse_simulator_list(
    output: &str,
    platform: Platform,
) -> Result<Vec<Device>, SimctlError> {
    if !output.contains(DEVICES_HEADER) {
        return Err(SimctlError::ToolUnavailable);
    }

    let mut devices = Vec::new();
    let mut os_type = "unknown".to_string();
    let mut os_version = "unknown".to_string();

    for line in output.lines() {
        if line.starts_with("== ") {
            continue;
        }
        if let Some(header) = line.strip_prefix("-- ") {
            let header = header.strip_suffix(" --").unwrap_or(header);
            let mut parts = header.split_whitespace();
            os_type = parts.next().unwrap_or("unknown").to_string();
            os_version = parts.next().unwrap_or("unknown").to_string();
            continue;
        }

        let Some(caps) = device_row_re().captures(line) else {
            continue;
        };
        if caps.get(4).is_some() {
            // unavailable annotation, dropped regardless of platform
            continue;
        }
        if os_type != platform.as_str() {
            continue;
        }

        devices.push(Device {
            name: caps[1].to_string(),
            udid: caps[2].to_string(),
            os_version: os_version.clone(),
            state: caps[3].to_string(),
            is_simulator: true,
        });
    }

    Ok(devices)
}

/// Wrapper for the `xcrun simctl` subcommands this crate uses.
///
/// All methods are synchronous and block until the spawned command exits.
#[derive(Clone)]
pub struct Simctl {
    runner: Arc<dyn CommandRunner>,
}

impl Simctl {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// List the requested platform's simulator devices.
    ///
    /// # Errors
    ///
    /// - [`SimctlError::Io`] if the command cannot be spawned
    /// - [`SimctlError::ToolUnavailable`] if the listing is unusable
    pub fn list_simulators(&self, platform: Platform) -> Result<Vec<Device>, SimctlError> {
        debug!("fetching available simulator devices");
        let output = self.runner.capture("xcrun", &["simctl", "list", "devices"])?;
        parse_simulator_list(&output, platform)
    }

    /// Shut down a simulator.
    pub fn shutdown(&self, udid: &str) -> Result<(), SimctlError> {
        self.runner.capture("xcrun", &["simctl", "shutdown", udid])?;
        Ok(())
    }

    /// Erase a simulator's content and settings.
    ///
    /// Idempotent at the tool level; erasing an already-erased simulator
    /// succeeds.
    pub fn erase(&self, udid: &str) -> Result<(), SimctlError> {
        self.runner.capture("xcrun", &["simctl", "erase", udid])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample listing matching the catalog format across several sections.
    const SAMPLE_LISTING: &str = "\
== Devices ==
-- iOS 9.0 --
    iPhone 5 (0EDE6AFC-3767-425A-9658-AAA30A60F212) (Shutdown)
    iPhone 6 (1C3A4F5B-2767-4C5A-9658-BBB30A60F212) (Booted)
    iPad Air 2 (4F3B8059-03FD-4D72-99C0-6E9BBEE2A9CE) (Shutdown) (unavailable, device type profile not found)
-- iOS 9.2 --
    iPhone 6s (A141F23B-96B3-491A-8949-813B376C28A7) (Shutdown)
-- tvOS 9.1 --
    Apple TV 1080p (83C3BAF8-54AD-4403-A688-D0B6E58020AF) (Shutdown)
-- Unavailable: com.apple.CoreSimulator.SimRuntime.iOS-8-4 --
    iPhone 4s (B9B7E936-9C83-4D80-9D89-ED11B8C88BAD) (Shutdown) (unavailable, runtime profile not found)
";

    #[test]
    fn test_parses_only_requested_platform() {
        let devices = parse_simulator_list(SAMPLE_LISTING, Platform::Ios).unwrap();

        assert_eq!(devices.len(), 3);
        assert!(devices.iter().all(|d| d.is_simulator));

        assert_eq!(devices[0].name, "iPhone 5");
        assert_eq!(devices[0].udid, "0EDE6AFC-3767-425A-9658-AAA30A60F212");
        assert_eq!(devices[0].os_version, "9.0");
        assert_eq!(devices[0].state, "Shutdown");

        assert_eq!(devices[1].name, "iPhone 6");
        assert_eq!(devices[1].state, "Booted");

        // Section version follows the row into its record.
        assert_eq!(devices[2].name, "iPhone 6s");
        assert_eq!(devices[2].os_version, "9.2");
    }

    #[test]
    fn test_parses_tvos_section() {
        let devices = parse_simulator_list(SAMPLE_LISTING, Platform::TvOs).unwrap();

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "Apple TV 1080p");
        assert_eq!(devices[0].os_version, "9.1");
    }

    #[test]
    fn test_unavailable_rows_are_dropped() {
        let devices = parse_simulator_list(SAMPLE_LISTING, Platform::Ios).unwrap();
        assert!(devices.iter().all(|d| d.name != "iPad Air 2"));

        // Rows under an unavailable runtime section never match a platform
        // token either way.
        assert!(devices.iter().all(|d| d.name != "iPhone 4s"));
    }

    #[test]
    fn test_unavailable_annotation_wins_over_platform_match() {
        let listing = "\
== Devices ==
-- iOS 9.0 --
    iPhone 5 (AAAA-1111) (Shutdown)
    iPad 2 (BBBB-2222) (Booted) (unavailable, reason)
";
        let devices = parse_simulator_list(listing, Platform::Ios).unwrap();

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "iPhone 5");
        assert_eq!(devices[0].udid, "AAAA-1111");
        assert_eq!(devices[0].os_version, "9.0");
        assert_eq!(devices[0].state, "Shutdown");
        assert!(devices[0].is_simulator);
    }

    #[test]
    fn test_missing_header_is_tool_unavailable() {
        let result = parse_simulator_list("simctl: command not found\n", Platform::Ios);
        assert!(matches!(result, Err(SimctlError::ToolUnavailable)));
    }

    #[test]
    fn test_no_matching_platform_yields_empty() {
        let devices = parse_simulator_list(SAMPLE_LISTING, Platform::WatchOs).unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let listing = "\
== Devices ==
-- iOS 9.0 --
garbage line without the expected shape
    iPhone 5 (0EDE6AFC-3767-425A-9658-AAA30A60F212) (Shutdown)
";
        let devices = parse_simulator_list(listing, Platform::Ios).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "iPhone 5");
    }

    #[test]
    fn test_result_preserves_line_order() {
        let devices = parse_simulator_list(SAMPLE_LISTING, Platform::Ios).unwrap();
        let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["iPhone 5", "iPhone 6", "iPhone 6s"]);
    }
}
