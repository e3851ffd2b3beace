//! Parking garage controller, host entry point.
//!
//! Runs the [`GarageController`] against the in-memory [`SimHardware`] so the
//! gate, light and fee logic can be driven from a terminal:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  CLI (clap)  ──▶  GarageCommand / poll()             │
//! │                                                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │            GarageController (pure logic)       │  │
//! │  └────────────────────────────────────────────────┘  │
//! │  ──────────────── Port Trait Boundary ─────────────  │
//! │  SimHardware (pins + clock) · StdDelay · LogEventSink │
//! │  JsonConfigFile (ConfigPort)                         │
//! └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use parking_garage::GarageController;
use parking_garage::adapters::config_file::JsonConfigFile;
use parking_garage::adapters::log_sink::LogEventSink;
use parking_garage::adapters::sim::SimHardware;
use parking_garage::adapters::time::StdDelay;
use parking_garage::app::commands::GarageCommand;
use parking_garage::app::ports::ConfigPort;
use parking_garage::config::GarageConfig;
use parking_garage::pins::PinId;

/// Single-bay parking garage controller (simulated hardware).
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Configuration file (JSON). Defaults are used if it does not exist.
    #[arg(short, long, default_value = "garage.json")]
    config: PathBuf,

    /// Occupancy sensor pin that reads "occupied". Repeat for several spots.
    #[arg(short, long = "occupied", value_name = "PIN")]
    occupied: Vec<PinId>,

    /// Pin the simulated RTC to this time instead of the host clock.
    #[arg(long, value_parser = parse_datetime, value_name = "DATETIME")]
    now: Option<NaiveDateTime>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print door, light and occupancy state.
    Status,
    /// Open the gate.
    Open,
    /// Close the gate.
    Close,
    /// Drive the red light.
    Light {
        #[arg(value_enum)]
        mode: LightMode,
    },
    /// Price a session that started at ENTRY and ends now (RTC time).
    Fee {
        #[arg(long, value_parser = parse_datetime, value_name = "ENTRY")]
        entry: NaiveDateTime,
    },
    /// Run the control loop: sample occupancy and manage the red light.
    Run {
        /// Number of cycles; 0 runs forever.
        #[arg(long, default_value_t = 0)]
        cycles: u32,
    },
    /// Write the default configuration to the config path.
    InitConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum LightMode {
    On,
    Off,
    Auto,
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, with `T` or a space.
fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .ok_or_else(|| format!("'{s}' is not YYYY-MM-DDTHH:MM[:SS]"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("Parking garage v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Configuration ──────────────────────────────────────
    let store = JsonConfigFile::new(&cli.config);
    if matches!(cli.command, Command::InitConfig) {
        store
            .save(&GarageConfig::default())
            .with_context(|| format!("writing {}", store.path().display()))?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }
    let config = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;
    let poll_interval = Duration::from_millis(u64::from(config.poll_interval_ms));

    // ── 2. Simulated hardware ─────────────────────────────────
    let mut hw = SimHardware::new();
    for &pin in &cli.occupied {
        hw.set_input(pin, true)
            .with_context(|| format!("simulating pin {pin}"))?;
    }
    if let Some(now) = cli.now {
        hw.set_now(now);
    }

    // ── 3. Controller (re-homes the gate) ─────────────────────
    let mut garage =
        GarageController::new(config, hw, StdDelay::new()).context("starting controller")?;
    let mut sink = LogEventSink::new();
    garage.start(&mut sink);

    // ── 4. Command ────────────────────────────────────────────
    match cli.command {
        Command::Status => {
            let snapshot = garage.poll(&mut sink)?;
            println!(
                "door={:?} red_light={} occupied={}/{} spots={:?}",
                garage.door_state(),
                if garage.is_red_light_on() { "on" } else { "off" },
                snapshot.occupied,
                snapshot.capacity,
                snapshot.spots,
            );
        }
        Command::Open => garage.handle_command(GarageCommand::OpenDoor, &mut sink)?,
        Command::Close => garage.handle_command(GarageCommand::CloseDoor, &mut sink)?,
        Command::Light { mode } => {
            let cmd = match mode {
                LightMode::On => GarageCommand::RedLightOn,
                LightMode::Off => GarageCommand::RedLightOff,
                LightMode::Auto => GarageCommand::ManageRedLight,
            };
            garage.handle_command(cmd, &mut sink)?;
        }
        Command::Fee { entry } => {
            let quote = garage.quote_parking_fee(entry)?;
            println!(
                "{:.2} ({} billed hour(s){})",
                quote.amount,
                quote.billed_hours,
                if quote.weekend { ", weekend rate" } else { "" }
            );
        }
        Command::Run { cycles } => {
            let mut done = 0u32;
            while cycles == 0 || done < cycles {
                garage.poll(&mut sink)?;
                done += 1;
                std::thread::sleep(poll_interval);
            }
        }
        // Handled before hardware start-up.
        Command::InitConfig => {}
    }

    Ok(())
}
