//! Property tests for the ledger invariants.

use std::sync::Arc;

use chrono::NaiveDate;
use liquid_core::{
    progress_percent, AggregationEngine, Database, IntakeController, LedgerStore, Preferences,
    ReminderPolicy,
};
use proptest::prelude::*;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn running_total_never_negative(amounts in prop::collection::vec(-200i64..200, 1..40)) {
        let db = Arc::new(Database::open_memory().unwrap());
        let intake = IntakeController::new(db.clone(), Preferences::new(db.clone()));

        let mut expected = 0i64;
        for amount in amounts {
            intake.add_intake(day(), amount).unwrap();
            expected = (expected + amount).max(0);
            let total = db.sum_by_date(day()).unwrap().unwrap_or(0);
            prop_assert!(total >= 0);
            prop_assert_eq!(total, expected);
        }
    }

    #[test]
    fn progress_always_in_bounds(total in any::<i64>(), goal in any::<i64>()) {
        let pct = progress_percent(total, goal);
        prop_assert!((0..=100).contains(&pct));
        if goal <= 0 {
            prop_assert_eq!(pct, 0);
        }
    }

    #[test]
    fn engine_progress_in_bounds(total in 0i64..10_000, goal in 1i64..500) {
        let db = Arc::new(Database::open_memory().unwrap());
        let prefs = Preferences::new(db.clone());
        let engine = AggregationEngine::new(db.clone(), prefs.clone());
        let intake = IntakeController::new(db, prefs);
        intake.set_daily_goal(day(), goal).unwrap();
        intake.add_intake(day(), total).unwrap();

        let pct = engine.progress_percentage(day());
        prop_assert!((0..=100).contains(&pct));
        if total >= goal {
            prop_assert_eq!(pct, 100);
        }
    }

    #[test]
    fn expected_progress_is_monotonic(a in 0u32..1440, b in 0u32..1440) {
        let policy = ReminderPolicy::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let t = |m: u32| chrono::NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap();
        prop_assert!(policy.expected_progress(t(lo)) <= policy.expected_progress(t(hi)));
    }
}
