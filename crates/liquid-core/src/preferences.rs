//! Cup size preference.
//!
//! Cup size is process-wide and not date-scoped. Totals are stored in raw
//! ounces, so changing it only affects increments recorded afterwards and
//! how cups are displayed.

use std::sync::Arc;

use crate::error::{CoreError, ValidationError};
use crate::ledger::PreferenceStore;

/// Preference key for the cup size in ounces.
pub const CUP_SIZE_KEY: &str = "cup_size_oz";

/// Cup size used when nothing has been stored.
pub const DEFAULT_CUP_SIZE_OZ: i64 = 8;

/// Typed accessor over a [`PreferenceStore`].
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
    default_cup_size_oz: i64,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            default_cup_size_oz: DEFAULT_CUP_SIZE_OZ,
        }
    }

    /// Override the fallback cup size (from configuration).
    pub fn with_default_cup_size(mut self, oz: i64) -> Self {
        self.default_cup_size_oz = oz;
        self
    }

    /// Stored cup size, or the default when unset or unreadable.
    pub fn cup_size(&self) -> i64 {
        self.store
            .get_int(CUP_SIZE_KEY, self.default_cup_size_oz)
            .unwrap_or_else(|e| {
                tracing::warn!("failed to read cup size, using default: {e}");
                self.default_cup_size_oz
            })
    }

    /// Cup size floored at 1 oz, safe to divide by or log as a full cup.
    pub fn effective_cup_size(&self) -> i64 {
        self.cup_size().max(1)
    }

    /// Store a new cup size.
    ///
    /// # Errors
    /// Rejects non-positive sizes; store failures surface as `StoreUnavailable`.
    pub fn set_cup_size(&self, oz: i64) -> Result<(), CoreError> {
        if oz <= 0 {
            return Err(ValidationError::InvalidValue {
                field: "cup_size_oz".into(),
                message: format!("{oz} oz is not a positive size"),
            }
            .into());
        }
        self.store.set_int(CUP_SIZE_KEY, oz)?;
        tracing::debug!(cup_size_oz = oz, "updated cup size");
        Ok(())
    }
}
