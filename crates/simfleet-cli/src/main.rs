//! CLI for listing and resetting Apple simulators and connected devices.
//!
//! # Usage
//!
//! ```bash
//! # List every iOS simulator and connected device
//! simfleet list
//!
//! # Only simulators, as JSON
//! simfleet -f json list --simulators
//!
//! # Another platform
//! simfleet -p tvos list
//!
//! # Erase one simulator by UDID (shuts it down first if booted)
//! simfleet reset 0EDE6AFC-3767-425A-9658-AAA30A60F212
//!
//! # Erase one simulator by destination pair
//! simfleet reset --name "iPhone 6s" --os 9.2
//!
//! # Erase every simulator for the platform
//! simfleet reset-all
//! ```
//!
//! The platform defaults to the `default_platform` recorded in
//! `~/.simfleet/config.json`, then to iOS.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use simfleet_core::config::FleetConfig;
use simfleet_core::device::Device;
use simfleet_core::manager::{DeviceManager, SimulatorSelector};
use simfleet_core::platform::Platform;
use simfleet_core::runner::SystemRunner;
use simfleet_core::simctl::SimctlError;

/// List and reset Apple simulators and connected devices.
#[derive(Parser)]
#[command(name = "simfleet")]
#[command(about = "Discover and reset Apple simulators and connected devices")]
#[command(version)]
struct Cli {
    /// Platform to target (defaults to the configured platform, then iOS)
    #[arg(short, long, env = "SIMFLEET_PLATFORM")]
    platform: Option<PlatformArg>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PlatformArg {
    Ios,
    Tvos,
    Watchos,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Tvos => Platform::TvOs,
            PlatformArg::Watchos => Platform::WatchOs,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// List devices for the platform
    List {
        /// Only simulator devices
        #[arg(long, conflicts_with = "connected")]
        simulators: bool,
        /// Only physically connected devices
        #[arg(long)]
        connected: bool,
    },

    /// Erase one simulator, shutting it down first if booted
    Reset {
        /// UDID of the simulator
        udid: Option<String>,
        /// Device name (used together with --os)
        #[arg(short, long, requires = "os", conflicts_with = "udid")]
        name: Option<String>,
        /// OS version, e.g. 9.2 (used together with --name)
        #[arg(short, long, requires = "name")]
        os: Option<String>,
    },

    /// Erase every simulator for the platform
    ResetAll,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    Discovery(String),
    Output(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Usage(_) => ExitCode::from(2),
            CliError::Discovery(_) => ExitCode::from(1),
            CliError::Output(_) => ExitCode::from(3),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "Usage error: {}", msg),
            CliError::Discovery(msg) => write!(f, "{}", msg),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl From<SimctlError> for CliError {
    fn from(err: SimctlError) -> Self {
        CliError::Discovery(err.to_string())
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let platform = match cli.platform {
        Some(arg) => Platform::from(arg),
        None => FleetConfig::load().default_platform.unwrap_or(Platform::Ios),
    };
    debug!("targeting platform {}", platform);

    let manager = DeviceManager::new(Arc::new(SystemRunner));

    match cli.command {
        Command::List {
            simulators,
            connected,
        } => {
            let devices = if simulators {
                manager.simulators(platform)?
            } else if connected {
                manager.connected_devices(platform)
            } else {
                manager.all(platform)?
            };
            print_devices(&devices, cli.format)
        }

        Command::Reset { udid, name, os } => {
            let selector = match (&udid, &name, &os) {
                (Some(udid), None, None) => SimulatorSelector::Udid(udid.as_str()),
                (None, Some(name), Some(os)) => SimulatorSelector::NameAndVersion {
                    name: name.as_str(),
                    os_version: os.as_str(),
                },
                _ => {
                    return Err(CliError::Usage(
                        "specify a UDID, or --name together with --os".to_string(),
                    ))
                }
            };
            manager.reset_simulator(platform, &selector)?;
            Ok(())
        }

        Command::ResetAll => {
            manager.reset_all_simulators(platform)?;
            Ok(())
        }
    }
}

fn print_devices(devices: &[Device], format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(devices)
            .map_err(|e| CliError::Output(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    if devices.is_empty() {
        eprintln!("No devices found");
        return Ok(());
    }
    for device in devices {
        let kind = if device.is_simulator {
            "simulator"
        } else {
            "device"
        };
        println!(
            "{} -- {} ({}) [{}] ({})",
            device.udid, device.name, device.os_version, kind, device.state
        );
    }
    Ok(())
}
