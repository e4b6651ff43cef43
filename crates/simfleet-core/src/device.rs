//! The device record and its lifecycle operation.
//!
//! A [`Device`] is constructed fresh on every discovery pass and is never
//! persisted. [`Device::reset`] has an external side effect only; the
//! in-memory record keeps its pre-reset `state`, so callers re-discover to
//! observe the device afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::simctl::{Simctl, SimctlError};

/// One simulated or physically connected device.
///
/// For simulators the `udid` is the UUID-formatted token from the catalog
/// listing; for connected hardware it is the serial-derived identifier
/// recovered from USB enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Human-readable display name (e.g., "iPhone 6s").
    pub name: String,

    /// Unique device identifier.
    pub udid: String,

    /// Platform-specific version string (e.g., "9.0").
    pub os_version: String,

    /// Lifecycle state ("Booted", "Shutdown", ...). Connected hardware is
    /// always reported as "Booted".
    pub state: String,

    /// Discriminates simulators from connected hardware.
    pub is_simulator: bool,
}

impl Device {
    /// Whether the device is currently in the "Booted" state.
    pub fn is_booted(&self) -> bool {
        self.state == "Booted"
    }

    /// Erase the simulator's content and settings, shutting it down first
    /// if it is booted.
    ///
    /// The erase step runs unconditionally; shutting down an already
    /// shut-down simulator is skipped. Errors from either external action
    /// propagate to the caller.
    pub fn reset(&self, simctl: &Simctl) -> Result<(), SimctlError> {
        info!("Resetting {}", self);
        if self.is_booted() {
            simctl.shutdown(&self.udid)?;
        }
        simctl.erase(&self.udid)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
