//! Config command handlers

use anyhow::{bail, Context, Result};

use trove_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "remote_url": config.remote_url,
                    "request_timeout_secs": config.request_timeout_secs,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  data_dir:             {}", config.data_dir.display());
            println!(
                "  remote_url:           {}",
                config.remote_url.as_deref().unwrap_or("(not set)")
            );
            println!("  request_timeout_secs: {}", config.request_timeout_secs);
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "data_dir" => {
            config.data_dir = value.clone().into();
        }
        "remote_url" => {
            config.remote_url = if value.is_empty() {
                None
            } else {
                Some(value.clone())
            };
        }
        "request_timeout_secs" => {
            config.request_timeout_secs = value
                .parse()
                .with_context(|| format!("Invalid timeout value: {}", value))?;
        }
        _ => bail!(
            "Unknown configuration key: {}. \
             Valid keys: data_dir, remote_url, request_timeout_secs",
            key
        ),
    }

    config.save().context("Failed to save configuration")?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}
