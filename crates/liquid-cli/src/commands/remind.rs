use chrono::NaiveTime;
use clap::Subcommand;
use liquid_core::{Clock, FixedClock, Notifier, ReminderCheck, ReminderMessage, SystemClock};

use super::{print_json, today, App};

#[derive(Subcommand)]
pub enum RemindAction {
    /// Evaluate the reminder once and print the decision
    Check {
        /// Evaluate as if it were this time today (HH:MM)
        #[arg(long, value_parser = parse_hm)]
        at: Option<NaiveTime>,
    },
}

fn parse_hm(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

/// Prints notifications to stderr in place of a desktop notification.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        eprintln!("[{title}] {body}");
        Ok(())
    }
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::open()?;

    match action {
        RemindAction::Check { at } => {
            if !app.config.reminder.enabled {
                return print_json(&serde_json::json!({ "status": "disabled" }));
            }

            let clock: Box<dyn Clock> = match at {
                Some(time) => Box::new(FixedClock(today().and_time(time))),
                None => Box::new(SystemClock),
            };
            let decision = ReminderCheck::new(&app.engine, clock.as_ref(), &TerminalNotifier)
                .with_policy(app.config.reminder_policy()?)
                .with_message(ReminderMessage {
                    title: app.config.reminder.title.clone(),
                    body: app.config.reminder.body.clone(),
                })
                .run()?;
            print_json(&decision)
        }
    }
}
