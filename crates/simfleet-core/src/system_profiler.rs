//! USB topology scan via `system_profiler SPUSBDataType`.
//!
//! The topology listing is a free-form indented tree. Connected hardware is
//! located by device-class name fragments ("iPhone", "iPad", "AppleTV") and
//! its serial is read from a `Serial Number:` field a few lines below the
//! matching entry. Nearby USB hardware (hubs, card readers) also carries
//! serial fields, so a serial is only accepted when the whole field match
//! has the exact length of a long-form device identifier.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::warn;

use crate::runner::CommandRunner;

/// Total length of an accepted `Serial Number:` field match: the 15-char
/// field label plus a 40-digit hex identifier. This literal is the
/// discriminator between device identifiers and the shorter serials of
/// unrelated USB hardware.
pub const SERIAL_MATCH_LEN: usize = 55;

/// How many lines below a device-class line the serial field may appear.
pub const USB_INFO_LOOKAHEAD: usize = 10;

fn serial_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Serial Number: ([0-9a-f]+)").expect("serial field pattern"))
}

/// Scan a captured USB topology listing for serials of connected hardware
/// matching any of the given device-class fragments.
///
/// For every line containing a fragment, the following lines at offsets
/// 2..=[`USB_INFO_LOOKAHEAD`] are searched for an acceptable serial field
/// (the field and its value sit a couple of lines below the device
/// header). Serials are returned in scan order; duplicates are kept, since
/// distinct devices cannot collide on serial.
pub fn collect_serials(output: &str, device_classes: &[&str]) -> Vec<String> {
    let lines: Vec<&str> = output.lines().collect();
    let mut serials = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if !device_classes.iter().any(|class| line.contains(class)) {
            continue;
        }
        for offset in 2..=USB_INFO_LOOKAHEAD {
            let Some(candidate) = lines.get(index + offset) else {
                break;
            };
            let Some(caps) = serial_field_re().captures(candidate) else {
                continue;
            };
            if caps[0].len() == SERIAL_MATCH_LEN {
                serials.push(caps[1].to_string());
            }
        }
    }

    serials
}

/// Wrapper for the `system_profiler` USB data type query.
#[derive(Clone)]
pub struct SystemProfiler {
    runner: Arc<dyn CommandRunner>,
}

impl SystemProfiler {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Serials of connected hardware matching the given device classes.
    ///
    /// Never fails: a command that cannot run reads as an empty topology,
    /// and discovery degrades to fewer results.
    pub fn usb_serials(&self, device_classes: &[&str]) -> Vec<String> {
        let output = match self.runner.capture("system_profiler", &["SPUSBDataType"]) {
            Ok(output) => output,
            Err(err) => {
                warn!("system_profiler failed: {err}");
                return Vec::new();
            }
        };
        collect_serials(&output, device_classes)
    }
}
