//! Logging setup: timestamped, leveled events to both the console and a
//! daily log file `db_errors_<YYYYMMDD>.log` under the given directory.

use crate::core::{DbKeepError, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builds the log file name for the current date.
pub fn log_file_name() -> String {
    format!("db_errors_{}.log", Local::now().format("%Y%m%d"))
}

/// Initializes the global tracing subscriber with a console layer and a
/// file layer appending to `<log_dir>/db_errors_<YYYYMMDD>.log`. The log
/// directory is created if missing.
///
/// The file name is resolved once at initialization, so rotation happens
/// per process start, one file per day.
pub fn init<P: AsRef<Path>>(log_dir: P) -> Result<()> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join(log_file_name());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| DbKeepError::App(format!("failed to initialize logging: {}", e)))?;

    Ok(())
}
