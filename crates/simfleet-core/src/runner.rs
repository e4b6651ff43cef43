//! External command execution seam.
//!
//! Discovery never inspects exit codes: the developer tools involved print
//! usable listings even when they exit non-zero, and tool health is judged
//! by the text they produce (see [`crate::simctl::DEVICES_HEADER`]). The
//! trait exists so tests can replay captured tool output without spawning
//! anything.

use std::io;
use std::process::Command;

/// Runs one external command synchronously and returns its captured stdout.
pub trait CommandRunner: Send + Sync {
    /// Spawn `program` with `args`, block until it exits, and return stdout.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] only when the process cannot be spawned or
    /// its output cannot be read; a non-zero exit status is not an error.
    fn capture(&self, program: &str, args: &[&str]) -> io::Result<String>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let output = Command::new(program).args(args).output()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
