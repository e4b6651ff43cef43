//! The device registry: aggregates simulator and connected-device
//! discovery for one platform and exposes the reset facades.
//!
//! Discovery is synchronous and uncached: every call re-runs the external
//! tools, so results always reflect live tool state. The registry records
//! the last simulator listing in an explicit [`SimulatorCache`] whose
//! snapshot callers can observe, but it never serves discovery results
//! from it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use simfleet_core::manager::DeviceManager;
//! use simfleet_core::platform::Platform;
//! use simfleet_core::runner::SystemRunner;
//!
//! let manager = DeviceManager::new(Arc::new(SystemRunner));
//! for device in manager.all(Platform::Ios).unwrap() {
//!     println!("{}: {} ({})", device.name, device.udid, device.state);
//! }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::device::Device;
use crate::instruments::Instruments;
use crate::platform::Platform;
use crate::runner::CommandRunner;
use crate::simctl::{Simctl, SimctlError};
use crate::system_profiler::SystemProfiler;

/// Snapshot of the most recent simulator listing.
///
/// Explicit store/snapshot/clear operations; the registry refreshes the
/// snapshot on every `simulators` call and reads it only through
/// [`DeviceManager::cached_simulators`]. Serving discovery from the
/// snapshot would hand out stale lifecycle states to callers that boot or
/// shut simulators down between passes.
#[derive(Default)]
pub struct SimulatorCache {
    devices: Mutex<Option<Vec<Device>>>,
}

impl SimulatorCache {
    pub fn store(&self, devices: &[Device]) {
        *self.lock() = Some(devices.to_vec());
    }

    pub fn snapshot(&self) -> Option<Vec<Device>> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<Device>>> {
        // Single logical caller; the mutex only satisfies aliasing rules.
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// How to pick one simulator for a targeted reset.
#[derive(Debug, Clone, Copy)]
pub enum SimulatorSelector<'a> {
    /// Match on the unique device identifier.
    Udid(&'a str),
    /// Match on display name and OS version together. Useful with build
    /// tools that address simulators by `name, OS` destination pairs,
    /// where several simulators can share a name across versions.
    NameAndVersion {
        name: &'a str,
        os_version: &'a str,
    },
}

impl SimulatorSelector<'_> {
    fn matches(&self, device: &Device) -> bool {
        match self {
            SimulatorSelector::Udid(udid) => device.udid == *udid,
            SimulatorSelector::NameAndVersion { name, os_version } => {
                device.name == *name && device.os_version == *os_version
            }
        }
    }
}

/// Aggregates both discovery strategies behind one command runner.
pub struct DeviceManager {
    simctl: Simctl,
    profiler: SystemProfiler,
    instruments: Instruments,
    cache: SimulatorCache,
}

impl DeviceManager {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            simctl: Simctl::new(Arc::clone(&runner)),
            profiler: SystemProfiler::new(Arc::clone(&runner)),
            instruments: Instruments::new(runner),
            cache: SimulatorCache::default(),
        }
    }

    /// The simulator tool handle shared by this registry, for callers that
    /// reset individual [`Device`] records themselves.
    pub fn simctl(&self) -> &Simctl {
        &self.simctl
    }

    /// Every simulator and connected device for the platform, simulators
    /// first.
    pub fn all(&self, platform: Platform) -> Result<Vec<Device>, SimctlError> {
        let mut devices = self.simulators(platform)?;
        devices.extend(self.connected_devices(platform));
        Ok(devices)
    }

    /// The platform's simulator devices, freshly listed.
    ///
    /// Stores the result in the cache before returning it.
    ///
    /// # Errors
    ///
    /// [`SimctlError::ToolUnavailable`] when the catalog tool is broken;
    /// [`SimctlError::Io`] when it cannot be spawned. Fatal, not retried.
    pub fn simulators(&self, platform: Platform) -> Result<Vec<Device>, SimctlError> {
        let devices = self.simctl.list_simulators(platform)?;
        self.cache.store(&devices);
        Ok(devices)
    }

    /// The platform's physically connected devices.
    ///
    /// Scans the USB topology for the platform's device classes, then
    /// resolves the collected serials through the device listing. Both
    /// steps are skipped when they cannot produce results: a platform with
    /// no USB device classes invokes nothing, and an empty serial set
    /// skips the listing tool, which is slow to start.
    ///
    /// Never fails; broken tools degrade to an empty result.
    pub fn connected_devices(&self, platform: Platform) -> Vec<Device> {
        debug!("fetching available connected devices");

        let device_classes = platform.device_classes();
        if device_classes.is_empty() {
            return Vec::new();
        }

        let serials = self.profiler.usb_serials(device_classes);
        if serials.is_empty() {
            return Vec::new();
        }

        self.instruments.connected_devices(&serials)
    }

    /// The last stored simulator listing, if any.
    pub fn cached_simulators(&self) -> Option<Vec<Device>> {
        self.cache.snapshot()
    }

    /// Forget the stored simulator listing.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Erase every simulator for the platform, shutting down booted ones
    /// first.
    pub fn reset_all_simulators(&self, platform: Platform) -> Result<(), SimctlError> {
        for device in self.simulators(platform)? {
            device.reset(&self.simctl)?;
        }
        Ok(())
    }

    /// Reset the first simulator matching the selector.
    ///
    /// A selector that matches nothing is a no-op, not an error.
    pub fn reset_simulator(
        &self,
        platform: Platform,
        selector: &SimulatorSelector<'_>,
    ) -> Result<(), SimctlError> {
        let devices = self.simulators(platform)?;
        match devices.iter().find(|device| selector.matches(device)) {
            Some(device) => device.reset(&self.simctl),
            None => {
                debug!("no simulator matched {:?}", selector);
                Ok(())
            }
        }
    }
}
