use chrono::NaiveDate;
use clap::Args;
use liquid_core::{HistoryEntry, RangeStats, DEFAULT_HISTORY_DAYS};
use serde::Serialize;

use super::{print_json, today, App};

#[derive(Args)]
pub struct HistoryArgs {
    /// Number of days ending today
    #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS, conflicts_with_all = ["from", "to"])]
    days: u32,
    /// First day of an explicit range (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,
    /// Last day of an explicit range (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
}

#[derive(Serialize)]
struct HistoryReport {
    stats: RangeStats,
    entries: Vec<HistoryEntry>,
}

pub fn run(args: HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::open()?;

    let entries = match (args.from, args.to) {
        (Some(from), Some(to)) => app.history.history_for_range(from, to),
        _ => app.history.recent_history(today(), args.days),
    };

    print_json(&HistoryReport {
        stats: RangeStats::from_entries(&entries),
        entries,
    })
}
