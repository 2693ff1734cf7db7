use std::fs;

use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Config, LOG_ENV};

pub const LOG_FILE: &str = "kiosk.log";

/// Filter used when `KIOSK_LOG_LEVEL` is unset.
#[cfg(debug_assertions)]
const DEFAULT_FILTER: &str = "info";
#[cfg(not(debug_assertions))]
const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber: a non-blocking file layer under
/// `<data_dir>/logs` plus a stderr layer. stdout stays reserved for the
/// rendered screens.
///
/// The returned guard must stay alive until exit or buffered lines are lost.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let log_dir = config.data_dir.join("logs");
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(env_filter()?);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter()?);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(guard)
}

fn env_filter() -> Result<EnvFilter> {
    let filter = EnvFilter::try_from_env(LOG_ENV.as_str())
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;
    Ok(filter)
}
