mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, GoalConfig, IntakeConfig, ReminderConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/liquid[-dev]/` based on LIQUID_ENV.
///
/// Set LIQUID_ENV=dev to use the development data directory, or
/// LIQUID_DATA_DIR to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("LIQUID_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("LIQUID_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("liquid-dev")
            } else {
                base_dir.join("liquid")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
