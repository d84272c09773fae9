//! Intake ledger data model and store contracts.
//!
//! The ledger is append-only: removals are recorded as negative events and
//! nothing is ever updated or deleted. Goal settings are versioned by the date
//! they take effect; a second setting for the same date replaces the first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One recorded change to a day's intake. Negative amounts are removals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeEvent {
    /// Assigned by the store, monotonic.
    pub id: i64,
    pub date: NaiveDate,
    pub amount_oz: i64,
}

/// A daily goal that applies from `effective_date` until superseded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSetting {
    pub effective_date: NaiveDate,
    pub goal_oz: i64,
}

/// Sum of every event logged on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_oz: i64,
}

/// Durable store for intake events and goal settings.
///
/// Implementations must be safe to share between the foreground, widget and
/// background call sites; no cross-call transaction is assumed.
pub trait LedgerStore: Send + Sync {
    /// Append an event and return it with its assigned id.
    fn append(&self, date: NaiveDate, amount_oz: i64) -> Result<IntakeEvent, StoreError>;

    /// Sum of amounts for `date`, or `None` when nothing was logged.
    fn sum_by_date(&self, date: NaiveDate) -> Result<Option<i64>, StoreError>;

    /// Events for `date` in insertion order.
    fn logs_for(&self, date: NaiveDate) -> Result<Vec<IntakeEvent>, StoreError>;

    /// Insert or replace the goal keyed by its effective date.
    fn upsert_goal(&self, goal: &GoalSetting) -> Result<(), StoreError>;

    /// Goal with the latest effective date on or before `date`.
    fn latest_goal_as_of(&self, date: NaiveDate) -> Result<Option<GoalSetting>, StoreError>;

    /// Per-day totals for the inclusive range, ascending by date.
    ///
    /// Only dates with at least one event are returned.
    fn range_grouped_totals(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyTotal>, StoreError>;
}

/// Integer key/value preferences.
pub trait PreferenceStore: Send + Sync {
    fn get_int(&self, key: &str, default: i64) -> Result<i64, StoreError>;
    fn set_int(&self, key: &str, value: i64) -> Result<(), StoreError>;
}
