//! Device listing via `instruments -s devices`, the join source that
//! resolves USB serials to named devices.
//!
//! Each listing row has the shape `<name> (<os_version>) [<identifier>]`.
//! Rows whose bracketed identifier equals a previously collected serial
//! become connected [`Device`] records; everything else (the host machine,
//! simulator rows with their UUID identifiers) falls through the pattern
//! or the join and is ignored.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, warn};

use crate::device::Device;
use crate::runner::CommandRunner;

/// `<name> (<os_version>) [<identifier>]`
fn device_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(.+) \(([0-9.]+)\) \[([0-9a-f]+)\]?").expect("device listing row pattern")
    })
}

/// Join collected serials against a captured device listing.
///
/// Emits one connected device per (row, serial) pair whose identifiers
/// match, preserving listing order. Connected hardware is always reported
/// as "Booted"; the listing carries no state column. A serial with no
/// matching row yields nothing, which is not an error.
pub fn join_serials(output: &str, serials: &[String]) -> Vec<Device> {
    let mut devices = Vec::new();

    for line in output.lines() {
        for serial in serials {
            let Some(caps) = device_row_re().captures(line) else {
                continue;
            };
            if &caps[3] != serial.as_str() {
                continue;
            }
            debug!("USB device found: \"{}\" ({}) [{}]", &caps[1], &caps[2], serial);
            devices.push(Device {
                name: caps[1].to_string(),
                udid: caps[3].to_string(),
                os_version: caps[2].to_string(),
                state: "Booted".to_string(),
                is_simulator: false,
            });
        }
    }

    devices
}

/// Wrapper for the `instruments` device listing.
#[derive(Clone)]
pub struct Instruments {
    runner: Arc<dyn CommandRunner>,
}

impl Instruments {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Resolve collected serials to named connected devices.
    ///
    /// Never fails: a listing tool that cannot run reads as an empty
    /// listing and yields no matches.
    pub fn connected_devices(&self, serials: &[String]) -> Vec<Device> {
        let output = match self.runner.capture("instruments", &["-s", "devices"]) {
            Ok(output) => output,
            Err(err) => {
                warn!("instruments failed: {err}");
                return Vec::new();
            }
        };
        join_serials(&output, serials)
    }
}
