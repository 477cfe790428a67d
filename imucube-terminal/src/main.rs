//! IMU Cube - live attitude viewer
//!
//! Reads `roll,pitch,yaw` lines (degrees) from a serial device and shows a
//! rotating cube in the terminal.
//! Controls:
//!   - Q/ESC/Ctrl-C: Quit

use anyhow::{Context, Result};
use clap::Parser;
use imucube_core::{AngleSource, SweepSource};
use imucube_terminal::{AppConfig, PresentMode, SerialAngleSource, TerminalApp};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "imucube=info,imucube_core=info,imucube_terminal=info";

/// Live 3D attitude cube for serial IMU readings
#[derive(Parser, Debug)]
#[command(name = "imucube")]
#[command(about = "Visualize roll/pitch/yaw from a serial IMU as a rotating cube", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port (overrides config)
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate (overrides config)
    #[arg(short, long)]
    baud: Option<u32>,

    /// Frame rate cap (overrides config)
    #[arg(long)]
    fps: Option<u32>,

    /// Draw with ASCII characters instead of true-color blocks
    #[arg(long)]
    ascii: bool,

    /// Use a synthetic tumbling motion instead of a serial device
    #[arg(long)]
    demo: bool,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Write logs to this file (the terminal is busy drawing)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn list_ports() -> Result<()> {
    let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;
    if ports.is_empty() {
        println!("No serial ports found");
    }
    for port in ports {
        println!("{}", port.port_name);
    }
    Ok(())
}

fn run_viewer<S: AngleSource>(source: S, config: &AppConfig, mode: PresentMode) -> Result<()> {
    let mut app = TerminalApp::new(source, &config.viewer, mode)
        .context("Failed to query terminal size")?;
    app.run()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    if cli.list_ports {
        return list_ports();
    }

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(port) = cli.port {
        config.serial.port = port;
    }
    if let Some(baud) = cli.baud {
        config.serial.baud_rate = baud;
    }
    if let Some(fps) = cli.fps {
        config.viewer.target_fps = fps;
    }
    config.validate().context("Invalid configuration")?;

    let mode = if cli.ascii {
        PresentMode::Ascii
    } else {
        PresentMode::HalfBlock
    };

    if cli.demo {
        info!("Running with synthetic motion");
        return run_viewer(SweepSource::default(), &config, mode);
    }

    let source = SerialAngleSource::open(&config.serial)
        .with_context(|| format!("Could not connect to {}", config.serial.port))?;
    println!(
        "Connected to {} at {} baud (press Q to quit)",
        config.serial.port, config.serial.baud_rate
    );

    run_viewer(source, &config, mode)
}
