use std::fs::File;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use lazy_static::lazy_static;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config;

lazy_static! {
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", config::PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn open_log_file(directory: &Path) -> std::io::Result<(File, PathBuf)> {
    std::fs::create_dir_all(directory)?;
    let log_path = directory.join(LOG_FILE.clone());
    let log_file = File::create(&log_path)?;
    Ok((log_file, log_path))
}

/// Logs go to a file in the data directory; stdout belongs to the menu.
/// An unwritable data directory leaves the shell running without a log file.
pub fn init() -> Result<()> {
    let log_file = match open_log_file(&config::get_data_dir()) {
        Ok(opened) => Some(opened),
        Err(e) => {
            eprintln!("⚠️  Logging disabled: {e}");
            None
        }
    };

    let env_filter = EnvFilter::builder().with_default_directive(tracing::Level::INFO.into());
    // RUST_LOG first, then DROIDCTL_LOG_LEVEL, otherwise info.
    let env_filter = env_filter
        .try_from_env()
        .or_else(|_| env_filter.with_env_var(LOG_ENV.clone()).from_env())?;

    let log_path = log_file.as_ref().map(|(_, path)| path.clone());
    let file_subscriber = log_file.map(|(file, _)| {
        fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_writer(file)
            .with_target(false)
            .with_ansi(false)
            .with_filter(env_filter)
    });

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    tracing::info!("{} v{} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    if let Some(path) = log_path {
        tracing::info!("log file: {}", path.display());
    }
    Ok(())
}
