//! # Liquid Core Library
//!
//! Business logic for the Liquid hydration tracker. Front ends (the CLI here,
//! a desktop or mobile shell elsewhere) are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Ledger**: append-only intake events and dated goal settings behind the
//!   [`LedgerStore`] trait, with a SQLite implementation in [`storage`]
//! - **Aggregation**: daily total, cups and goal progress, recomputed on
//!   every read
//! - **Intake**: records additions and removals, keeping each day's total
//!   non-negative
//! - **History**: per-day completion across a date range
//! - **Reminder**: time-of-day heuristic for behind-schedule notifications
//!
//! Components take their store and preferences explicitly; there is no
//! global instance.

pub mod aggregation;
pub mod clock;
pub mod error;
pub mod history;
pub mod intake;
pub mod ledger;
pub mod preferences;
pub mod reminder;
pub mod storage;

pub use aggregation::{progress_percent, AggregationEngine, DaySnapshot, DEFAULT_GOAL_OZ};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use history::{HistoryEntry, HistorySummarizer, RangeStats, DEFAULT_HISTORY_DAYS};
pub use intake::{IncrementKind, IntakeController};
pub use ledger::{DailyTotal, GoalSetting, IntakeEvent, LedgerStore, PreferenceStore};
pub use preferences::{Preferences, DEFAULT_CUP_SIZE_OZ};
pub use reminder::{Notifier, ReminderCheck, ReminderDecision, ReminderMessage, ReminderPolicy};
pub use storage::{Config, Database};
