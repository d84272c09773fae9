//! Intake controller: records additions and removals against the ledger.
//!
//! The controller owns the non-negative daily total invariant. A removal
//! larger than what was logged is clamped to zero out the day instead of
//! being rejected.
//!
//! Writes through one controller are serialized, so the read-then-append
//! clamp is exact within a process. Separate processes sharing the same
//! database can still race and undershoot zero by at most one increment.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, StoreError, ValidationError};
use crate::ledger::{GoalSetting, IntakeEvent, LedgerStore};
use crate::preferences::Preferences;

/// Which button produced the last addition.
///
/// Session state owned by the caller; it is never persisted and starts as
/// `Full` in a fresh process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncrementKind {
    #[default]
    Full,
    Quarter,
}

impl IncrementKind {
    /// Ounces this increment represents for `cup_size_oz`.
    pub fn amount_oz(self, cup_size_oz: i64) -> i64 {
        match self {
            IncrementKind::Full => cup_size_oz,
            IncrementKind::Quarter => cup_size_oz / 4,
        }
    }
}

/// Validates and records intake deltas.
pub struct IntakeController {
    store: Arc<dyn LedgerStore>,
    prefs: Preferences,
    write_lock: Mutex<()>,
}

impl IntakeController {
    pub fn new(store: Arc<dyn LedgerStore>, prefs: Preferences) -> Self {
        Self {
            store,
            prefs,
            write_lock: Mutex::new(()),
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Append a signed delta for `date`.
    ///
    /// Positive amounts are recorded as-is with no product ceiling. A
    /// negative amount that would take the day below zero is clamped to
    /// `-current_total`. Returns the event as committed.
    ///
    /// # Errors
    /// `StoreUnavailable` if the current total cannot be read or the append
    /// fails. `Validation` if the day's total would no longer fit in an `i64`.
    pub fn add_intake(&self, date: NaiveDate, amount_oz: i64) -> Result<IntakeEvent, CoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;

        let mut amount = amount_oz;
        if amount != 0 {
            let current = self.store.sum_by_date(date)?.unwrap_or(0);
            match current.checked_add(amount) {
                None => {
                    return Err(ValidationError::InvalidValue {
                        field: "amount_oz".into(),
                        message: format!("{amount_oz} oz would overflow the day's total"),
                    }
                    .into());
                }
                Some(next) if next < 0 => {
                    tracing::debug!(%date, requested = amount_oz, current, "clamping removal to zero");
                    amount = -current;
                }
                Some(_) => {}
            }
        }

        Ok(self.store.append(date, amount)?)
    }

    /// Log one cup at the current cup size.
    pub fn add_full_cup(&self, date: NaiveDate) -> Result<IntakeEvent, CoreError> {
        self.add_intake(date, self.prefs.effective_cup_size())
    }

    /// Log a quarter cup. No-op when the cup is too small to quarter.
    pub fn add_quarter_cup(&self, date: NaiveDate) -> Result<Option<IntakeEvent>, CoreError> {
        let quarter = IncrementKind::Quarter.amount_oz(self.prefs.effective_cup_size());
        if quarter == 0 {
            return Ok(None);
        }
        self.add_intake(date, quarter).map(Some)
    }

    /// Undo the last kind of addition (not the last event).
    ///
    /// The amount is recomputed from the current cup size, then recorded as a
    /// removal subject to the clamp in [`add_intake`](Self::add_intake).
    /// A zero-sized quarter is a no-op.
    pub fn remove_last_increment(
        &self,
        date: NaiveDate,
        last: IncrementKind,
    ) -> Result<Option<IntakeEvent>, CoreError> {
        let amount = last.amount_oz(self.prefs.effective_cup_size());
        if amount == 0 {
            return Ok(None);
        }
        self.add_intake(date, -amount).map(Some)
    }

    /// Set the goal that applies from `date` onward, replacing any setting
    /// already effective on that exact date.
    ///
    /// # Errors
    /// `InvalidGoal` for non-positive goals (nothing is written).
    pub fn set_daily_goal(&self, date: NaiveDate, goal_oz: i64) -> Result<GoalSetting, CoreError> {
        if goal_oz <= 0 {
            return Err(CoreError::InvalidGoal { goal_oz });
        }
        let goal = GoalSetting {
            effective_date: date,
            goal_oz,
        };
        self.store.upsert_goal(&goal)?;
        Ok(goal)
    }

    /// Change the cup size for subsequent increments.
    pub fn set_cup_size(&self, oz: i64) -> Result<(), CoreError> {
        self.prefs.set_cup_size(oz)
    }
}
