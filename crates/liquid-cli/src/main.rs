use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "liquid-cli", version, about = "Liquid hydration tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log or undo water intake
    Drink {
        #[command(subcommand)]
        action: commands::drink::DrinkAction,
    },
    /// Today's total, cups and progress
    Today,
    /// Per-day history with range statistics
    History(commands::history::HistoryArgs),
    /// Daily goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Cup size preference
    Cup {
        #[command(subcommand)]
        action: commands::cup::CupAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Behind-schedule reminder
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LIQUID_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Drink { action } => commands::drink::run(action),
        Commands::Today => commands::today::run(),
        Commands::History(args) => commands::history::run(args),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Cup { action } => commands::cup::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Remind { action } => commands::remind::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
