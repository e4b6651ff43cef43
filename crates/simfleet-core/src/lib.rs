//! # simfleet-core
//!
//! Core library for discovering the Apple mobile devices available to a
//! build or test toolchain on macOS — simulators and physically connected
//! hardware — and for resetting simulators.
//!
//! Discovery reconciles three loosely structured tool listings describing
//! the same devices: the simulator catalog (`xcrun simctl list devices`),
//! the USB topology (`system_profiler SPUSBDataType`), and the device
//! listing (`instruments -s devices`) that resolves USB serials to names
//! and OS versions.
//!
//! ## Modules
//!
//! - [`manager`] - Device registry aggregating both discovery strategies
//! - [`simctl`] - Simulator catalog parsing and lifecycle subcommands
//! - [`system_profiler`] - USB topology scan for connected-device serials
//! - [`instruments`] - Device listing join resolving serials to devices
//! - [`device`] - The device record and reset operation
//! - [`platform`] - The supported Apple platforms
//! - [`runner`] - External command execution seam
//! - [`config`] - Persistent user configuration
//!
//! ## External Dependencies
//!
//! Xcode must be installed for `xcrun simctl` and `instruments`;
//! `system_profiler` ships with macOS.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use simfleet_core::manager::{DeviceManager, SimulatorSelector};
//! use simfleet_core::platform::Platform;
//! use simfleet_core::runner::SystemRunner;
//!
//! let manager = DeviceManager::new(Arc::new(SystemRunner));
//!
//! // List everything attached or simulated for iOS.
//! for device in manager.all(Platform::Ios).unwrap() {
//!     println!("{}: {} ({})", device.name, device.udid, device.state);
//! }
//!
//! // Erase one simulator by destination pair.
//! let selector = SimulatorSelector::NameAndVersion {
//!     name: "iPhone 6s",
//!     os_version: "9.2",
//! };
//! manager.reset_simulator(Platform::Ios, &selector).unwrap();
//! ```

pub mod config;
pub mod device;
pub mod instruments;
pub mod manager;
pub mod platform;
pub mod runner;
pub mod simctl;
pub mod system_profiler;
