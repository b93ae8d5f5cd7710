use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use voltlog_core::{
    BusConfig, BusError, Mcp3202, Recorder, Settings, Shutdown, SpiBus, SpiTransport, Summary,
};

/// Never printed: the program takes no arguments.
#[allow(dead_code)]
const USAGE: &str =
    "Usage: mcp3202 - reads cyclic A0 und A1 from SPI-Bus CE1 with 3.3V ref. voltage";

/// Diagnostics beyond the status and error lines need `RUST_LOG`.
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let settings = load_settings().unwrap_or_else(|e| {
        log::warn!("{e:#}, using defaults");
        Settings::default()
    });
    log::debug!("{settings:?}");

    let shutdown = Shutdown::install();
    let outcome = poll(&settings, &shutdown, SpiBus::open, std::thread::sleep);
    ExitCode::from(exit_status(&outcome))
}

/// Opens the bus and polls until shutdown.
fn poll<B, F>(
    settings: &Settings,
    shutdown: &Shutdown,
    open: F,
    sleep: impl FnMut(Duration),
) -> Result<Summary, BusError>
where
    B: SpiTransport,
    F: FnOnce(&BusConfig) -> Result<B, BusError>,
{
    let bus = open(&settings.bus)?;
    let recorder = Recorder::new(Mcp3202::new(bus), settings);
    log::info!("logging to {}", recorder.log().path().display());
    Ok(recorder.run(shutdown, sleep))
}

/// A bus that cannot be opened is the only failure exit.
fn exit_status(outcome: &Result<Summary, BusError>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("Can't open the SPI bus: {e}");
            1
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("voltlog").join("settings.json"))
}

fn load_settings() -> Result<Settings> {
    let Some(path) = settings_path() else {
        return Ok(Settings::default());
    };
    let settings = Settings::load(&path)
        .with_context(|| format!("loading {}", path.display()))?
        .unwrap_or_default();
    Ok(settings)
}
