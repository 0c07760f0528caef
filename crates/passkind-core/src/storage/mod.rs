mod config;
pub mod database;

pub use config::{ApiConfig, Config, UiConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/passkind[-dev]/` based on PASSKIND_ENV.
///
/// Set PASSKIND_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PASSKIND_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("passkind-dev")
    } else {
        base_dir.join("passkind")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
