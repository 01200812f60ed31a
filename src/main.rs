mod commands;
mod logger;
mod render;
mod utils;

use anyhow::Result;
use calmirror_core::CalendarManager;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "calmirror")]
#[command(version)]
#[command(about = "Mirror remote iCalendar feeds locally and query their events")]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for `list`
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

/// Output format for `events` and `get`
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Ics,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a calendar source by iCal URL
    Add {
        /// Short name for the calendar (prompted for if missing)
        name: Option<String>,

        /// The .ics URL (prompted for if missing)
        url: Option<String>,
    },
    /// Remove a calendar source and its synced events
    Remove {
        name: String,
    },
    /// Sync calendars from their iCal URLs
    Sync {
        /// Only sync this calendar
        name: Option<String>,
    },
    /// List configured calendars
    List {
        #[arg(short, long, value_enum, default_value_t)]
        output: ListFormat,
    },
    /// List events in a date range
    Events {
        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,

        /// today, week, month, YYYY-MM-DD, or two dates (defaults to the next 30 days)
        #[arg(num_args = 0..=2)]
        range: Vec<String>,
    },
    /// Show one event by UID
    Get {
        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,

        uid: String,
    },
    /// Show configuration paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let manager = CalendarManager::from_env()?;

    match cli.command {
        Commands::Add { name, url } => commands::add::run(&manager, name, url),
        Commands::Remove { name } => commands::remove::run(&manager, &name),
        Commands::Sync { name } => commands::sync::run(&manager, name.as_deref()),
        Commands::List { output } => commands::list::run(&manager, output),
        Commands::Events { output, range } => commands::events::run(&manager, &range, output),
        Commands::Get { output, uid } => commands::get::run(&manager, &uid, output),
        Commands::Config => commands::config::run(&manager),
    }
}
