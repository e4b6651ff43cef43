//! Shared test helpers for simfleet-core integration tests.
//!
//! Provides a scripted [`CommandRunner`] that replays canned tool output
//! per command line and records every invocation in order, so tests can
//! assert both results and which external commands discovery decided to
//! run.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use simfleet_core::runner::CommandRunner;

/// Replays canned stdout for known command lines; unknown command lines
/// fail with a NotFound io error, standing in for a missing tool.
pub struct ScriptedRunner {
    outputs: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new(outputs: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            outputs: outputs
                .iter()
                .map(|(command, output)| (command.to_string(), output.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Every command line passed to `capture`, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn capture(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let command = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(command.clone());
        self.outputs.get(&command).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no scripted output for `{command}`"),
            )
        })
    }
}

// Command lines discovery is expected to issue.
pub const SIMCTL_LIST: &str = "xcrun simctl list devices";
pub const USB_TOPOLOGY: &str = "system_profiler SPUSBDataType";
pub const INSTRUMENTS_LIST: &str = "instruments -s devices";

/// A 40-hex-digit serial; with the field label it makes the accepted
/// 55-character match.
pub const SERIAL: &str = "0123abcd0123abcd0123abcd0123abcd0123abcd";

pub const SIMCTL_OUTPUT: &str = "\
== Devices ==
-- iOS 9.0 --
    iPhone 5 (0EDE6AFC-3767-425A-9658-AAA30A60F212) (Shutdown)
    iPhone 6 (1C3A4F5B-2767-4C5A-9658-BBB30A60F212) (Booted)
    iPad Air 2 (4F3B8059-03FD-4D72-99C0-6E9BBEE2A9CE) (Shutdown) (unavailable, device type profile not found)
-- tvOS 9.1 --
    Apple TV 1080p (83C3BAF8-54AD-4403-A688-D0B6E58020AF) (Shutdown)
-- watchOS 2.1 --
    Apple Watch 38mm (5E2C2C93-4E3A-44B5-9AF4-DD1A77E02AA1) (Shutdown)
";

pub const USB_OUTPUT: &str = "\
USB:

    USB 3.0 Bus:

      Host Controller Driver: AppleUSBXHCI

        iPhone:

          Product ID: 0x12a8
          Vendor ID: 0x05ac  (Apple Inc.)
          Version: 2.10
          Serial Number: 0123abcd0123abcd0123abcd0123abcd0123abcd
          Speed: Up to 480 Mb/s
";

pub const INSTRUMENTS_OUTPUT: &str = "\
Known Devices:
Office Mac Pro [A1B2C3D4-E5F6-7890-ABCD-EF1234567890]
Example iPhone (9.0) [0123abcd0123abcd0123abcd0123abcd0123abcd]
iPhone 5 (9.0) [0EDE6AFC-3767-425A-9658-AAA30A60F212] (Simulator)
";
