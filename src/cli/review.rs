//! The review command
//!
//! Resolves settings from the command line and config file, loads the
//! inputs, and prints the report.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};

use super::app::Cli;
use super::output::Output;
use crate::domain::{self, CalendarEvent, EventWindow, GoalRegistry, GoalsFormat, Report, ReviewSources};
use crate::storage::{Config, EventSource, IcsCalendar, NoCalendar, TextFile};

/// Fully resolved inputs of one review run
#[derive(Debug, Clone)]
pub struct ReviewSettings {
    pub todo: TextFile,
    pub done: TextFile,
    pub goals: TextFile,
    pub days: u32,
    pub calendar: Option<PathBuf>,
    pub goals_format: GoalsFormat,
    pub today: NaiveDate,
}

impl ReviewSettings {
    /// Command-line values win over the config file
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let todo = required(cli.todo.as_ref(), config.todo.as_ref(), "todo.txt", "todo")?;
        let done = required(cli.done.as_ref(), config.done.as_ref(), "done.txt", "done")?;
        let goals = required(cli.goals.as_ref(), config.goals.as_ref(), "goals", "goals")?;

        let goals_format = if cli.legacy_goals {
            GoalsFormat::Legacy
        } else {
            config.goals_format
        };

        Ok(Self {
            todo,
            done,
            goals,
            days: cli.days.unwrap_or(config.days),
            calendar: cli.calendar.clone().or_else(|| config.calendar.clone()),
            goals_format,
            today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
        })
    }
}

fn required(
    arg: Option<&PathBuf>,
    configured: Option<&PathBuf>,
    what: &str,
    key: &str,
) -> Result<TextFile> {
    arg.or(configured).map(TextFile::new).ok_or_else(|| {
        anyhow!(
            "No {} file given. Pass it as an argument or set `{}` in the config file.",
            what,
            key
        )
    })
}

/// Runs the review and prints it
pub fn run(settings: &ReviewSettings, output: &Output) -> Result<()> {
    let calendar: Box<dyn EventSource> = match &settings.calendar {
        Some(path) => Box::new(IcsCalendar::new(path)),
        None => Box::new(NoCalendar),
    };

    let report = generate(settings, calendar.as_ref(), output)?;

    if output.is_json() {
        output.data(&report);
    } else {
        output
            .text(&report.render())
            .context("Failed to write report")?;
    }

    Ok(())
}

/// Loads every input and builds the report
///
/// Required files are read before anything else; the first unreadable file
/// or malformed goals line stops the run.
pub fn generate(
    settings: &ReviewSettings,
    calendar: &dyn EventSource,
    output: &Output,
) -> Result<Report> {
    let todo = settings.todo.read_lines()?;
    let done = settings.done.read_lines()?;
    let goal_lines = settings.goals.read_lines()?;
    output.verbose_ctx(
        "review",
        &format!(
            "Loaded {} todo lines, {} done lines, {} goal lines",
            todo.len(),
            done.len(),
            goal_lines.len()
        ),
    );

    let registry = GoalRegistry::parse(&settings.goals.label(), &goal_lines, settings.goals_format)?;
    output.verbose_ctx(
        "review",
        &format!(
            "Parsed {} goals ({} format)",
            registry.len(),
            settings.goals_format.as_str()
        ),
    );

    let past_window = EventWindow::past(settings.today, settings.days);
    let upcoming_window = EventWindow::upcoming(settings.today, settings.days);
    let past_events = fetch_events(calendar, past_window, output);
    let upcoming_events = fetch_events(calendar, upcoming_window, output);

    output.verbose_ctx(
        "review",
        &format!(
            "Reviewing {} days ending {}",
            settings.days, settings.today
        ),
    );

    Ok(domain::review(
        settings.today,
        settings.days,
        &ReviewSources {
            todo: &todo,
            done: &done,
            registry: &registry,
            past_events: &past_events,
            upcoming_events: &upcoming_events,
        },
    ))
}

/// A calendar that cannot be read counts as empty
fn fetch_events(
    calendar: &dyn EventSource,
    window: EventWindow,
    output: &Output,
) -> Vec<CalendarEvent> {
    match calendar.list_events(window) {
        Ok(events) => {
            output.verbose_ctx(
                "calendar",
                &format!(
                    "{} events from {} between {} and {}",
                    events.len(),
                    calendar.describe(),
                    window.start,
                    window.end
                ),
            );
            events
        }
        Err(e) => {
            output.warn(&format!(
                "{:#}; continuing without calendar events",
                anyhow::Error::from(e)
            ));
            Vec::new()
        }
    }
}
