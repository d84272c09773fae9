pub mod config;
pub mod cup;
pub mod drink;
pub mod goal;
pub mod history;
pub mod remind;
pub mod today;

use std::sync::Arc;

use chrono::NaiveDate;
use liquid_core::{
    AggregationEngine, Config, Database, HistorySummarizer, IntakeController, Preferences,
};

/// Components wired over the on-disk database and configuration.
pub struct App {
    pub config: Config,
    pub intake: IntakeController,
    pub engine: AggregationEngine,
    pub history: HistorySummarizer,
}

impl App {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let db = Arc::new(Database::open()?);
        let prefs =
            Preferences::new(db.clone()).with_default_cup_size(config.intake.default_cup_size_oz);
        let engine = AggregationEngine::new(db.clone(), prefs.clone())
            .with_default_goal(config.goal.default_goal_oz);
        Ok(Self {
            intake: IntakeController::new(db.clone(), prefs),
            history: HistorySummarizer::new(db, engine.clone()),
            engine,
            config,
        })
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
