//! Aggregation engine: daily totals, cup counts, goals and progress.
//!
//! Every projection is recomputed from the ledger on each call. Events can
//! arrive from several call sites between reads, so nothing is cached.
//!
//! Reads degrade instead of failing: a store error yields 0 oz, the default
//! goal, or 0% progress, and is logged at `warn`. The display layer gets a
//! stale-but-sane view rather than an error.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::{IntakeEvent, LedgerStore};
use crate::preferences::Preferences;

/// Goal used for dates with no goal setting on or before them.
pub const DEFAULT_GOAL_OZ: i64 = 64;

/// Integer percentage of `goal_oz` reached by `total_oz`, clamped to `0..=100`.
///
/// Truncates toward zero; a non-positive goal yields 0.
pub fn progress_percent(total_oz: i64, goal_oz: i64) -> i64 {
    if goal_oz <= 0 {
        return 0;
    }
    (total_oz.saturating_mul(100) / goal_oz).clamp(0, 100)
}

/// Combined view of one day, as rendered by the main screen and widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub total_oz: i64,
    pub cups: f64,
    pub goal_oz: i64,
    pub progress_pct: i64,
    pub cup_size_oz: i64,
}

/// Read projections over the ledger.
#[derive(Clone)]
pub struct AggregationEngine {
    store: Arc<dyn LedgerStore>,
    prefs: Preferences,
    default_goal_oz: i64,
}

impl AggregationEngine {
    pub fn new(store: Arc<dyn LedgerStore>, prefs: Preferences) -> Self {
        Self {
            store,
            prefs,
            default_goal_oz: DEFAULT_GOAL_OZ,
        }
    }

    /// Override the fallback goal (from configuration).
    pub fn with_default_goal(mut self, goal_oz: i64) -> Self {
        self.default_goal_oz = goal_oz;
        self
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Sum of every event on `date`; 0 when nothing was logged.
    pub fn total_ounces_for_date(&self, date: NaiveDate) -> i64 {
        match self.store.sum_by_date(date) {
            Ok(total) => total.unwrap_or(0),
            Err(e) => {
                tracing::warn!(%date, "failed to read daily total: {e}");
                0
            }
        }
    }

    /// Total ounces expressed in the current cup size.
    pub fn total_cups_for_date(&self, date: NaiveDate) -> f64 {
        cups(self.total_ounces_for_date(date), self.prefs.effective_cup_size())
    }

    /// Goal from the latest setting effective on or before `date`.
    pub fn active_goal_for_date(&self, date: NaiveDate) -> i64 {
        match self.store.latest_goal_as_of(date) {
            Ok(Some(goal)) => goal.goal_oz,
            Ok(None) => self.default_goal_oz,
            Err(e) => {
                tracing::warn!(%date, "failed to read active goal: {e}");
                self.default_goal_oz
            }
        }
    }

    /// Progress toward the active goal, in `0..=100`.
    pub fn progress_percentage(&self, date: NaiveDate) -> i64 {
        progress_percent(
            self.total_ounces_for_date(date),
            self.active_goal_for_date(date),
        )
    }

    /// Raw events for `date`; empty on store failure.
    pub fn logs_for_date(&self, date: NaiveDate) -> Vec<IntakeEvent> {
        self.store.logs_for(date).unwrap_or_else(|e| {
            tracing::warn!(%date, "failed to read intake events: {e}");
            Vec::new()
        })
    }

    /// Everything a day view needs, read once.
    pub fn snapshot(&self, date: NaiveDate) -> DaySnapshot {
        let total_oz = self.total_ounces_for_date(date);
        let goal_oz = self.active_goal_for_date(date);
        let cup_size_oz = self.prefs.cup_size();
        DaySnapshot {
            date,
            total_oz,
            cups: cups(total_oz, cup_size_oz.max(1)),
            goal_oz,
            progress_pct: progress_percent(total_oz, goal_oz),
            cup_size_oz,
        }
    }
}

pub(crate) fn cups(total_oz: i64, cup_size_oz: i64) -> f64 {
    total_oz as f64 / cup_size_oz.max(1) as f64
}
