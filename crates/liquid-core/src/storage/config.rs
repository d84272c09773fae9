//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default cup size for a fresh install
//! - Default daily goal when no goal has been set
//! - Reminder window, threshold and notification text
//!
//! Configuration is stored at `~/.config/liquid/config.toml`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError, ValidationError};
use crate::reminder::ReminderPolicy;

/// Intake defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default = "default_cup_size_oz")]
    pub default_cup_size_oz: i64,
}

/// Goal defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    #[serde(default = "default_goal_oz")]
    pub default_goal_oz: i64,
}

/// Behind-schedule reminder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Start of the waking day, `HH:MM`.
    #[serde(default = "default_day_start")]
    pub day_start: String,
    /// End of the waking day, `HH:MM`.
    #[serde(default = "default_day_end")]
    pub day_end: String,
    /// Percentage points behind the linear ramp before a reminder fires.
    #[serde(default = "default_behind_threshold")]
    pub behind_threshold_pct: i64,
    /// Cadence hint for whatever schedules the check.
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_body")]
    pub body: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/liquid/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub goal: GoalConfig,
    #[serde(default)]
    pub reminder: ReminderConfig,
}

fn default_cup_size_oz() -> i64 {
    8
}
fn default_goal_oz() -> i64 {
    64
}
fn default_true() -> bool {
    true
}
fn default_day_start() -> String {
    "07:00".into()
}
fn default_day_end() -> String {
    "22:00".into()
}
fn default_behind_threshold() -> i64 {
    20
}
fn default_interval_hours() -> u32 {
    2
}
fn default_title() -> String {
    "Hydration Reminder".into()
}
fn default_body() -> String {
    "You're a bit behind on your water intake goal today. Time for a drink!".into()
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            default_cup_size_oz: default_cup_size_oz(),
        }
    }
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            default_goal_oz: default_goal_oz(),
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            day_start: default_day_start(),
            day_end: default_day_end(),
            behind_threshold_pct: default_behind_threshold(),
            interval_hours: default_interval_hours(),
            title: default_title(),
            body: default_body(),
        }
    }
}

fn parse_time(key: &str, raw: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("expected HH:MM, got '{raw}': {e}"),
    })
}

fn require_positive(field: &str, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::InvalidValue {
            field: field.into(),
            message: format!("must be greater than zero, got {value}"),
        });
    }
    Ok(())
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|e| invalid(e.to_string()))?,
                    serde_json::Value::Number(_) => value
                        .parse::<i64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot overwrite a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting.
    ///
    /// The updated tree is re-validated, so a non-positive default or a
    /// malformed reminder window is rejected before anything is saved.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check every section for values the core would refuse.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_positive("intake.default_cup_size_oz", self.intake.default_cup_size_oz)?;
        require_positive("goal.default_goal_oz", self.goal.default_goal_oz)?;
        self.reminder_policy()?;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Build the reminder policy described by the `[reminder]` section.
    pub fn reminder_policy(&self) -> Result<ReminderPolicy, CoreError> {
        let start = parse_time("reminder.day_start", &self.reminder.day_start)?;
        let end = parse_time("reminder.day_end", &self.reminder.day_end)?;
        if self.reminder.behind_threshold_pct < 0 {
            return Err(ValidationError::InvalidValue {
                field: "reminder.behind_threshold_pct".into(),
                message: "must not be negative".into(),
            }
            .into());
        }
        Ok(ReminderPolicy::new(start, end, self.reminder.behind_threshold_pct)?)
    }
}
