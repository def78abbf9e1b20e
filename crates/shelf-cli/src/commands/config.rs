//! Config command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};

use shelf_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "library_file": config.library_file,
                    "export_file": config.export_file,
                    "animate": config.animate,
                    "animation_delay_ms": config.animation_delay_ms,
                    "log_level": config.log_level,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.library_path().display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:           {}", config.data_dir.display());
            println!("  library_file:       {}", config.library_file);
            println!("  export_file:        {}", config.export_file);
            println!("  animate:            {}", config.animate);
            println!("  animation_delay_ms: {}", config.animation_delay_ms);
            println!(
                "  log_level:          {}",
                config.log_level.as_deref().unwrap_or("(not set)")
            );
            println!("  log_file:           {}", config.log_path().display());
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value and save it
///
/// Only the file is rewritten; `SHELF_*` overrides in the environment are
/// not copied into it.
pub fn set(
    config_path: Option<&PathBuf>,
    key: String,
    value: String,
    output: &Output,
) -> Result<()> {
    let path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    let mut config = Config::load_file(&path).context("Failed to load configuration")?;

    config.set(&key, &value)?;
    config.save_to(&path)?;

    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}
