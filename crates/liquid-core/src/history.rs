//! Multi-day history: per-day totals joined with the goal active that day.
//!
//! Goals are looked up per date, so a goal change inside the range applies
//! only from its effective date forward. Days with no events are omitted.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregation::{cups, progress_percent, AggregationEngine};
use crate::ledger::LedgerStore;

/// Window the history screen shows by default.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// One day of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub total_oz: i64,
    pub cups: f64,
    /// 0..=100
    pub percentage_complete: i64,
    pub goal_oz: i64,
}

/// Summary over a list of history entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeStats {
    pub days_logged: usize,
    pub average_oz: i64,
    /// Share of logged days that reached their goal, 0..=100.
    pub percent_on_target: i64,
}

impl RangeStats {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let count = entries.len();
        if count == 0 {
            return Self::default();
        }
        let sum: i64 = entries.iter().map(|e| e.total_oz).sum();
        let on_target = entries
            .iter()
            .filter(|e| e.percentage_complete >= 100)
            .count();
        Self {
            days_logged: count,
            average_oz: sum / count as i64,
            percent_on_target: (on_target * 100 / count) as i64,
        }
    }
}

/// Builds history entries from the ledger.
#[derive(Clone)]
pub struct HistorySummarizer {
    store: Arc<dyn LedgerStore>,
    engine: AggregationEngine,
}

impl HistorySummarizer {
    pub fn new(store: Arc<dyn LedgerStore>, engine: AggregationEngine) -> Self {
        Self { store, engine }
    }

    /// History for the inclusive range, newest first.
    ///
    /// Returns an empty list when `start > end` or the store cannot be read.
    pub fn history_for_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<HistoryEntry> {
        if start > end {
            tracing::debug!(%start, %end, "empty history range");
            return Vec::new();
        }

        let totals = match self.store.range_grouped_totals(start, end) {
            Ok(totals) => totals,
            Err(e) => {
                tracing::warn!(%start, %end, "failed to read history: {e}");
                return Vec::new();
            }
        };

        let cup_size = self.engine.preferences().effective_cup_size();
        let mut entries: Vec<HistoryEntry> = totals
            .into_iter()
            .map(|day| {
                let goal_oz = self.engine.active_goal_for_date(day.date);
                HistoryEntry {
                    date: day.date,
                    total_oz: day.total_oz,
                    cups: cups(day.total_oz, cup_size),
                    percentage_complete: progress_percent(day.total_oz, goal_oz),
                    goal_oz,
                }
            })
            .collect();

        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// The last `days` days ending at `today`, newest first.
    ///
    /// A window reaching past the earliest representable date starts there.
    pub fn recent_history(&self, today: NaiveDate, days: u32) -> Vec<HistoryEntry> {
        if days == 0 {
            return Vec::new();
        }
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .unwrap_or(NaiveDate::MIN);
        self.history_for_range(start, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::GoalSetting;
    use crate::preferences::Preferences;
    use crate::storage::Database;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    fn summarizer() -> (Arc<Database>, HistorySummarizer) {
        let db = Arc::new(Database::open_memory().unwrap());
        let engine = AggregationEngine::new(db.clone(), Preferences::new(db.clone()));
        (db.clone(), HistorySummarizer::new(db, engine))
    }

    fn entry(total_oz: i64, pct: i64) -> HistoryEntry {
        HistoryEntry {
            date: day(1),
            total_oz,
            cups: 0.0,
            percentage_complete: pct,
            goal_oz: 64,
        }
    }

    #[test]
    fn history_is_newest_first_and_skips_silent_days() {
        let (db, history) = summarizer();
        db.append(day(1), 32).unwrap();
        db.append(day(4), 64).unwrap();
        db.append(day(2), 8).unwrap();

        let dates: Vec<NaiveDate> = history
            .history_for_range(day(1), day(5))
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec![day(4), day(2), day(1)]);
    }

    #[test]
    fn entries_carry_cups_and_percentage() {
        let (db, history) = summarizer();
        db.append(day(3), 40).unwrap();

        let entries = history.history_for_range(day(3), day(3));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].total_oz, 40);
        assert_eq!(entries[0].cups, 5.0);
        assert_eq!(entries[0].goal_oz, 64);
        assert_eq!(entries[0].percentage_complete, 62);
    }

    #[test]
    fn goal_change_applies_from_effective_date() {
        let (db, history) = summarizer();
        db.upsert_goal(&GoalSetting { effective_date: day(1), goal_oz: 64 }).unwrap();
        db.upsert_goal(&GoalSetting { effective_date: day(2), goal_oz: 32 }).unwrap();
        for d in 1..=3 {
            db.append(day(d), 32).unwrap();
        }

        let entries = history.history_for_range(day(1), day(3));
        let goals: Vec<(NaiveDate, i64, i64)> = entries
            .iter()
            .map(|e| (e.date, e.goal_oz, e.percentage_complete))
            .collect();
        assert_eq!(
            goals,
            vec![(day(3), 32, 100), (day(2), 32, 100), (day(1), 64, 50)]
        );
    }

    #[test]
    fn inverted_range_is_empty() {
        let (db, history) = summarizer();
        db.append(day(2), 8).unwrap();
        assert!(history.history_for_range(day(3), day(1)).is_empty());
    }

    #[test]
    fn recent_history_covers_trailing_window() {
        let (db, history) = summarizer();
        db.append(day(1), 8).unwrap();
        db.append(day(2), 8).unwrap();
        db.append(day(10), 8).unwrap();

        let entries = history.recent_history(day(10), 9);
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(10), day(2)]);
        assert!(history.recent_history(day(10), 0).is_empty());
    }

    #[test]
    fn recent_history_with_huge_window_starts_at_earliest_date() {
        let (db, history) = summarizer();
        db.append(day(1), 8).unwrap();
        db.append(day(3), 16).unwrap();

        let dates: Vec<NaiveDate> = history
            .recent_history(day(3), u32::MAX)
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec![day(3), day(1)]);
    }

    #[test]
    fn range_stats_on_empty_list() {
        assert_eq!(RangeStats::from_entries(&[]), RangeStats::default());
    }

    #[test]
    fn range_stats_truncate() {
        let entries = vec![entry(64, 100), entry(10, 15), entry(81, 100)];
        let stats = RangeStats::from_entries(&entries);
        assert_eq!(stats.days_logged, 3);
        assert_eq!(stats.average_oz, 51);
        assert_eq!(stats.percent_on_target, 66);
    }
}
