//! SQLite-backed intake ledger and preference store.
//!
//! Provides persistent storage for:
//! - Intake events (append-only, signed amounts)
//! - Goal settings keyed by effective date
//! - Integer preferences (cup size)
//!
//! The connection sits behind a mutex so one `Arc<Database>` can serve the
//! foreground, widget and background call sites at once.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, migrations};
use crate::error::StoreError;
use crate::ledger::{DailyTotal, GoalSetting, IntakeEvent, LedgerStore, PreferenceStore};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(raw: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| StoreError::Corrupt(format!("bad date '{raw}': {e}")))
}

/// SQLite database for the hydration ledger.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the database at `~/.config/liquid/liquid.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        Self::open_at(dir.join("liquid.db"))
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        migrations::migrate(&conn).map_err(|e| StoreError::MigrationFailed(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl LedgerStore for Database {
    fn append(&self, date: NaiveDate, amount_oz: i64) -> Result<IntakeEvent, StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO intake_log (date, amount_oz) VALUES (?1, ?2)",
            params![date_key(date), amount_oz],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, %date, amount_oz, "appended intake event");
        Ok(IntakeEvent {
            id,
            date,
            amount_oz,
        })
    }

    fn sum_by_date(&self, date: NaiveDate) -> Result<Option<i64>, StoreError> {
        let conn = self.conn()?;
        let sum = conn.query_row(
            "SELECT SUM(amount_oz) FROM intake_log WHERE date = ?1",
            params![date_key(date)],
            |row| row.get::<_, Option<i64>>(0),
        )?;
        Ok(sum)
    }

    fn logs_for(&self, date: NaiveDate) -> Result<Vec<IntakeEvent>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, amount_oz FROM intake_log WHERE date = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![date_key(date)], |row| {
            Ok(IntakeEvent {
                id: row.get(0)?,
                date,
                amount_oz: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn upsert_goal(&self, goal: &GoalSetting) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO daily_goal (effective_date, goal_oz) VALUES (?1, ?2)",
            params![date_key(goal.effective_date), goal.goal_oz],
        )?;
        tracing::debug!(effective_date = %goal.effective_date, goal_oz = goal.goal_oz, "stored goal");
        Ok(())
    }

    fn latest_goal_as_of(&self, date: NaiveDate) -> Result<Option<GoalSetting>, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT effective_date, goal_oz FROM daily_goal
                 WHERE effective_date <= ?1
                 ORDER BY effective_date DESC
                 LIMIT 1",
                params![date_key(date)],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        row.map(|(raw, goal_oz)| {
            Ok(GoalSetting {
                effective_date: parse_date(&raw)?,
                goal_oz,
            })
        })
        .transpose()
    }

    fn range_grouped_totals(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyTotal>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, SUM(amount_oz) FROM intake_log
             WHERE date BETWEEN ?1 AND ?2
             GROUP BY date
             ORDER BY date",
        )?;
        let rows = stmt.query_map(params![date_key(start), date_key(end)], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut totals = Vec::new();
        for row in rows {
            let (raw, total_oz) = row?;
            totals.push(DailyTotal {
                date: parse_date(&raw)?,
                total_oz,
            });
        }
        Ok(totals)
    }
}

impl PreferenceStore for Database {
    fn get_int(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(value.unwrap_or(default))
    }

    fn set_int(&self, key: &str, value: i64) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
