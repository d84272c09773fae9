use chrono::NaiveDate;
use clap::Subcommand;
use liquid_core::IncrementKind;

use super::{print_json, today, App};

#[derive(Subcommand)]
pub enum DrinkAction {
    /// Log one full cup
    Full {
        /// Date to log against (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Log a quarter cup
    Quarter {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Log an exact amount; negative amounts remove
    Amount {
        /// Ounces
        #[arg(allow_negative_numbers = true)]
        oz: i64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Undo one increment (a full cup unless --quarter)
    Remove {
        /// The last increment was a quarter cup
        #[arg(long)]
        quarter: bool,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: DrinkAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::open()?;

    let (date, event) = match action {
        DrinkAction::Full { date } => {
            let date = date.unwrap_or_else(today);
            (date, Some(app.intake.add_full_cup(date)?))
        }
        DrinkAction::Quarter { date } => {
            let date = date.unwrap_or_else(today);
            (date, app.intake.add_quarter_cup(date)?)
        }
        DrinkAction::Amount { oz, date } => {
            let date = date.unwrap_or_else(today);
            (date, Some(app.intake.add_intake(date, oz)?))
        }
        DrinkAction::Remove { quarter, date } => {
            let date = date.unwrap_or_else(today);
            let kind = if quarter {
                IncrementKind::Quarter
            } else {
                IncrementKind::Full
            };
            (date, app.intake.remove_last_increment(date, kind)?)
        }
    };

    if event.is_none() {
        eprintln!("cup too small to split; nothing logged");
    }
    print_json(&app.engine.snapshot(date))
}
