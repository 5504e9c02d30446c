mod config;

pub use config::{Config, DefaultsConfig, DisplayConfig, ModelConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/betterrest[-dev]/` based on BETTERREST_ENV.
///
/// Set BETTERREST_ENV=dev to use the development directory, or
/// BETTERREST_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("BETTERREST_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("BETTERREST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("betterrest-dev")
            } else {
                base_dir.join("betterrest")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirectoryUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
