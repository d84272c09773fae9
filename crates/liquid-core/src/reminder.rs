//! Behind-schedule reminder heuristic.
//!
//! Expected progress ramps linearly from 0% at the start of the waking day to
//! 100% at its end. A reminder fires when actual progress trails that ramp by
//! more than the threshold. Outside the window nothing fires.
//!
//! [`ReminderPolicy::evaluate`] is a pure decision over a clock reading and a
//! percentage. [`ReminderCheck`] wires it to the engine, a clock and a
//! notifier for whatever schedules the periodic check.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::aggregation::AggregationEngine;
use crate::clock::Clock;
use crate::error::{CoreError, ValidationError};

/// Delivers a one-shot notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Outcome of one reminder evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReminderDecision {
    /// Outside the waking window; nothing evaluated.
    QuietHours,
    OnTrack { expected: i64, actual: i64 },
    Behind { expected: i64, actual: i64 },
}

impl ReminderDecision {
    pub fn should_notify(&self) -> bool {
        matches!(self, ReminderDecision::Behind { .. })
    }
}

/// Waking window and tolerance for the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    day_start: NaiveTime,
    day_end: NaiveTime,
    behind_threshold_pct: i64,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            day_start: hm(7, 0),
            day_end: hm(22, 0),
            behind_threshold_pct: 20,
        }
    }
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or_default()
}

fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}

impl ReminderPolicy {
    /// # Errors
    /// `InvalidTimeWindow` unless `day_start < day_end`.
    pub fn new(
        day_start: NaiveTime,
        day_end: NaiveTime,
        behind_threshold_pct: i64,
    ) -> Result<Self, ValidationError> {
        if day_start >= day_end {
            return Err(ValidationError::InvalidTimeWindow {
                start: day_start,
                end: day_end,
            });
        }
        Ok(Self {
            day_start,
            day_end,
            behind_threshold_pct,
        })
    }

    pub fn day_start(&self) -> NaiveTime {
        self.day_start
    }

    pub fn day_end(&self) -> NaiveTime {
        self.day_end
    }

    pub fn behind_threshold_pct(&self) -> i64 {
        self.behind_threshold_pct
    }

    /// Before the start or after the end of the waking day. Both boundary
    /// instants themselves are inside the window.
    pub fn is_quiet_hours(&self, now: NaiveTime) -> bool {
        now < self.day_start || now > self.day_end
    }

    /// Linear expected progress for `now`, in `0..=100`.
    pub fn expected_progress(&self, now: NaiveTime) -> i64 {
        if now < self.day_start {
            return 0;
        }
        if now > self.day_end {
            return 100;
        }
        let span = (minute_of_day(self.day_end) - minute_of_day(self.day_start)).max(1);
        let elapsed = minute_of_day(now) - minute_of_day(self.day_start);
        (elapsed * 100 / span).clamp(0, 100)
    }

    /// Decide whether `actual` progress at `now` warrants a reminder.
    pub fn evaluate(&self, now: NaiveTime, actual: i64) -> ReminderDecision {
        if self.is_quiet_hours(now) {
            return ReminderDecision::QuietHours;
        }
        let expected = self.expected_progress(now);
        if actual < expected - self.behind_threshold_pct {
            ReminderDecision::Behind { expected, actual }
        } else {
            ReminderDecision::OnTrack { expected, actual }
        }
    }
}

/// Notification text sent when behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub title: String,
    pub body: String,
}

impl Default for ReminderMessage {
    fn default() -> Self {
        Self {
            title: "Hydration Reminder".into(),
            body: "You're a bit behind on your water intake goal today. Time for a drink!".into(),
        }
    }
}

/// One periodic reminder check against today's progress.
pub struct ReminderCheck<'a> {
    engine: &'a AggregationEngine,
    clock: &'a dyn Clock,
    notifier: &'a dyn Notifier,
    policy: ReminderPolicy,
    message: ReminderMessage,
}

impl<'a> ReminderCheck<'a> {
    pub fn new(
        engine: &'a AggregationEngine,
        clock: &'a dyn Clock,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            engine,
            clock,
            notifier,
            policy: ReminderPolicy::default(),
            message: ReminderMessage::default(),
        }
    }

    pub fn with_policy(mut self, policy: ReminderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_message(mut self, message: ReminderMessage) -> Self {
        self.message = message;
        self
    }

    /// Evaluate at the clock's current time and notify at most once.
    ///
    /// Progress is not read during quiet hours.
    ///
    /// # Errors
    /// `Notify` when the notifier fails to deliver.
    pub fn run(&self) -> Result<ReminderDecision, CoreError> {
        let now = self.clock.now();
        if self.policy.is_quiet_hours(now.time()) {
            return Ok(ReminderDecision::QuietHours);
        }

        let actual = self.engine.progress_percentage(now.date());
        let decision = self.policy.evaluate(now.time(), actual);

        if let ReminderDecision::Behind { expected, actual } = decision {
            tracing::info!(expected, actual, "behind schedule, sending reminder");
            self.notifier
                .notify(&self.message.title, &self.message.body)
                .map_err(|source| CoreError::Notify {
                    message: source.to_string(),
                    source: Some(source),
                })?;
        }

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_hours_bounds() {
        let p = ReminderPolicy::default();
        assert!(p.is_quiet_hours(hm(6, 59)));
        assert!(!p.is_quiet_hours(hm(7, 0)));
        assert!(!p.is_quiet_hours(hm(22, 0)));
        assert!(p.is_quiet_hours(NaiveTime::from_hms_opt(22, 0, 1).unwrap()));
        assert!(p.is_quiet_hours(hm(23, 30)));
    }

    #[test]
    fn expected_progress_ramp() {
        let p = ReminderPolicy::default();
        assert_eq!(p.expected_progress(hm(5, 0)), 0);
        assert_eq!(p.expected_progress(hm(7, 0)), 0);
        assert_eq!(p.expected_progress(hm(14, 30)), 50);
        assert_eq!(p.expected_progress(hm(10, 0)), 20);
        assert_eq!(p.expected_progress(hm(22, 0)), 100);
        assert_eq!(p.expected_progress(hm(23, 0)), 100);
    }

    #[test]
    fn behind_by_more_than_threshold_fires() {
        let p = ReminderPolicy::default();
        assert_eq!(
            p.evaluate(hm(14, 30), 20),
            ReminderDecision::Behind { expected: 50, actual: 20 }
        );
        assert_eq!(
            p.evaluate(hm(14, 30), 35),
            ReminderDecision::OnTrack { expected: 50, actual: 35 }
        );
    }

    #[test]
    fn exactly_at_threshold_does_not_fire() {
        let p = ReminderPolicy::default();
        assert!(!p.evaluate(hm(14, 30), 30).should_notify());
        assert!(p.evaluate(hm(14, 30), 29).should_notify());
    }

    #[test]
    fn early_morning_never_fires() {
        let p = ReminderPolicy::default();
        assert!(!p.evaluate(hm(7, 0), 0).should_notify());
        assert_eq!(p.evaluate(hm(3, 0), 0), ReminderDecision::QuietHours);
    }

    #[test]
    fn inverted_window_rejected() {
        assert!(ReminderPolicy::new(hm(22, 0), hm(7, 0), 20).is_err());
        assert!(ReminderPolicy::new(hm(9, 0), hm(9, 0), 20).is_err());
    }

    #[test]
    fn custom_window_ramp() {
        let p = ReminderPolicy::new(hm(8, 0), hm(18, 0), 10).unwrap();
        assert_eq!(p.expected_progress(hm(13, 0)), 50);
        assert!(p.evaluate(hm(13, 0), 39).should_notify());
        assert!(!p.evaluate(hm(13, 0), 40).should_notify());
    }
}
