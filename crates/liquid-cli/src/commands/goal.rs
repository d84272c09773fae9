use chrono::NaiveDate;
use clap::Subcommand;

use super::{today, App};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Print the goal active on a date
    Get {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Set the daily goal in ounces
    Set {
        oz: i64,
        /// Date the goal takes effect (YYYY-MM-DD), defaults to today
        #[arg(long)]
        from: Option<NaiveDate>,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::open()?;

    match action {
        GoalAction::Get { date } => {
            println!("{}", app.engine.active_goal_for_date(date.unwrap_or_else(today)));
        }
        GoalAction::Set { oz, from } => {
            let goal = app.intake.set_daily_goal(from.unwrap_or_else(today), oz)?;
            println!("goal set to {} oz from {}", goal.goal_oz, goal.effective_date);
        }
    }
    Ok(())
}
