//! Core error types for liquid-core.
//!
//! Writes surface these to the caller, which owns its own retry policy and
//! user-visible fallback. Read projections never return them; they degrade to
//! a safe default instead (see [`crate::aggregation`]).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for liquid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The ledger or preference store could not be read or written
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// Goal must be a positive number of ounces
    #[error("Invalid goal: {goal_oz} oz (must be greater than zero)")]
    InvalidGoal { goal_oz: i64 },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification delivery failed
    #[error("Notification failed: {message}")]
    Notify {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ledger/preference store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked by another writer
    #[error("Database is locked")]
    Locked,

    /// A thread panicked while holding the connection
    #[error("Database connection poisoned")]
    Poisoned,

    /// A stored row could not be decoded
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Reminder window where the day ends before it starts
    #[error("Invalid time window: end ({end}) must be after start ({start})")]
    InvalidTimeWindow {
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => match e.code {
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                    StoreError::Locked
                }
                _ => StoreError::QueryFailed(err.to_string()),
            },
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::StoreUnavailable(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_sqlite_maps_to_locked() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        assert!(matches!(StoreError::from(err), StoreError::Locked));
    }

    #[test]
    fn store_error_converts_to_store_unavailable() {
        let err: CoreError = StoreError::Poisoned.into();
        assert!(matches!(err, CoreError::StoreUnavailable(StoreError::Poisoned)));
        assert_eq!(err.to_string(), "Store unavailable: Database connection poisoned");
    }

    #[test]
    fn invalid_goal_message_names_amount() {
        let err = CoreError::InvalidGoal { goal_oz: -4 };
        assert!(err.to_string().contains("-4 oz"));
    }
}
