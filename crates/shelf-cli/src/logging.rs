//! File-based logging
//!
//! Logs never go to the terminal, where they would interleave with the menu.
//! Nothing is installed unless a log level is configured.

use std::fs::OpenOptions;

use tracing::info;
use tracing_subscriber::EnvFilter;

use shelf_core::Config;

/// Install the tracing subscriber if `log_level` is set
pub fn init(config: &Config) {
    let Some(log_level) = config.log_level.as_deref() else {
        return;
    };

    let log_path = config.log_path();
    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("shelf_core={},shelf_cli={}", log_level, log_level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}
