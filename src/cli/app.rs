//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;

use super::output::{Output, OutputFormat};
use super::review::{self, ReviewSettings};
use crate::storage::{Config, MAX_DAYS};

/// One-line usage hint printed after fatal errors
pub const USAGE: &str = "USAGE:  goals [todo.txt] [done.txt] [#goals.txt] [total days]";

const USAGE_NOTES: &str = "\
Expects:
  1. A todo.txt file. Lines starting with a (A) priority are prioritized.
  2. A done.txt file. Lines read `x YYYY-MM-DD ...`.
  3. A goals file listing one #goal and its +projects per line.
  4. The number of days to review. Defaults to 7 for a weekly review.

Files may also be set in the config file (see --config).";

#[derive(Parser)]
#[command(name = "goals")]
#[command(author, version, about = "Goals review for todo.txt users")]
#[command(after_help = USAGE_NOTES)]
pub struct Cli {
    /// todo.txt file
    pub todo: Option<PathBuf>,

    /// done.txt file
    pub done: Option<PathBuf>,

    /// Goals file (one #goal followed by its +projects per line)
    pub goals: Option<PathBuf>,

    /// Number of days to review
    #[arg(value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DAYS)))]
    pub days: Option<u32>,

    /// iCalendar (.ics) export to read events from
    #[arg(long)]
    pub calendar: Option<PathBuf>,

    /// Read the goals file leniently and sort goals by name
    #[arg(long)]
    pub legacy_goals: bool,

    /// Review as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Configuration file
    #[arg(long, env = "GOALS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("Goals review starting");
    if let Some(path) = &cli.config {
        output.verbose_ctx("config", &format!("Loaded config from: {}", path.display()));
    }

    let settings = ReviewSettings::resolve(&cli, &config)?;
    review::run(&settings, &output)?;

    output.verbose("Review completed successfully");
    Ok(())
}
