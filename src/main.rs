//! focusdb CLI
//!
//! Command-line interface operating directly on the backing file:
//! - Record a focus level for an hour
//! - Show a whole day
//! - Look up a single hour

use anyhow::Context;
use chrono::{Local, NaiveDate, Timelike};
use clap::{Parser, Subcommand};
use focusdb::config::Config;
use focusdb::store::{FocusStore, Level, DATE_FORMAT};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "focusdb")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track your per-hour focus level in a plain CSV file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the focus CSV file (default: from config)
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a focus level
    Log {
        /// Level ordinal: 0=None, 1=Very low, 2=Low, 3=Medium, 4=High, 5=Flow
        level: u8,
        /// Date in DD.MM.YYYY format (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Hour 0-23 (default: current hour)
        #[arg(short = 'H', long)]
        hour: Option<u8>,
    },

    /// Show all 24 hourly levels for a day
    Show {
        /// Date in DD.MM.YYYY format (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Look up the level for a single hour
    Hour {
        /// Date in DD.MM.YYYY format (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Hour 0-23 (default: current hour)
        #[arg(short = 'H', long)]
        hour: Option<u8>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "focusdb=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let path = match &cli.path {
        Some(path) => path.clone(),
        None => PathBuf::from(Config::load_default().storage.path),
    };
    let store = FocusStore::open(&path)
        .with_context(|| format!("failed to open store at {}", path.display()))?;

    match cli.command {
        Commands::Log { level, date, hour } => {
            let date = parse_date(date.as_deref())?;
            let hour = hour.unwrap_or_else(current_hour);
            let level = Level::try_from(level)
                .map_err(|_| anyhow::anyhow!("level must be 0-5, got {level}"))?;

            store.write_hour(date, hour, level)?;
            println!(
                "Recorded {}({}) for {} {:02}:00",
                level,
                level.ordinal(),
                date.format(DATE_FORMAT),
                hour
            );
        }

        Commands::Show { date } => {
            let date = parse_date(date.as_deref())?;
            let levels = store.read_day(date)?;

            println!("Focus on {}", date.format(DATE_FORMAT));
            for (hour, level) in levels.iter().enumerate() {
                println!("{hour:02}:00  {level}");
            }
        }

        Commands::Hour { date, hour } => {
            let date = parse_date(date.as_deref())?;
            let hour = hour.unwrap_or_else(current_hour);
            let level = store.read_hour(date, hour)?;

            println!(
                "Your focus level at {} {:02}:00 was {}({})",
                date.format(DATE_FORMAT),
                hour,
                level,
                level.ordinal()
            );
        }
    }

    store.close()?;
    Ok(())
}

/// Parse a `DD.MM.YYYY` argument, defaulting to today
fn parse_date(raw: Option<&str>) -> anyhow::Result<NaiveDate> {
    match raw {
        None => Ok(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .with_context(|| format!("invalid date {s:?}, expected DD.MM.YYYY")),
    }
}

fn current_hour() -> u8 {
    Local::now().hour() as u8
}
