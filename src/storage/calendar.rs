//! Calendar feeds
//!
//! The review asks a calendar for the events in a date window, once for the
//! days just reviewed and once for the days ahead. [`IcsCalendar`] reads a
//! local iCalendar export; [`NoCalendar`] stands in when none is configured.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ical::parser::ical::component::IcalEvent;
use thiserror::Error;

use crate::domain::{CalendarEvent, EventWindow};

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Failed to read calendar file {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid calendar format in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Anything that can list events for a date window
pub trait EventSource {
    /// Returns the events starting inside the window, in feed order
    fn list_events(&self, window: EventWindow) -> Result<Vec<CalendarEvent>, CalendarError>;

    /// Short description for verbose output
    fn describe(&self) -> String;
}

/// No calendar configured: every window is empty
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCalendar;

impl EventSource for NoCalendar {
    fn list_events(&self, _window: EventWindow) -> Result<Vec<CalendarEvent>, CalendarError> {
        Ok(Vec::new())
    }

    fn describe(&self) -> String {
        "no calendar".to_string()
    }
}

/// Events read from an `.ics` file
#[derive(Debug, Clone)]
pub struct IcsCalendar {
    path: PathBuf,
}

impl IcsCalendar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for IcsCalendar {
    fn list_events(&self, window: EventWindow) -> Result<Vec<CalendarEvent>, CalendarError> {
        let file = File::open(&self.path).map_err(|source| CalendarError::Read {
            path: self.path.clone(),
            source,
        })?;

        let mut events = Vec::new();
        for calendar in ical::IcalParser::new(BufReader::new(file)) {
            let calendar = calendar.map_err(|e| CalendarError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

            for event in &calendar.events {
                if let Some((start, parsed)) = parse_event(event) {
                    if window.contains(start) {
                        events.push(parsed);
                    }
                }
            }
        }

        Ok(events)
    }

    fn describe(&self) -> String {
        format!("calendar {}", self.path.display())
    }
}

/// Extracts the start date and text of a VEVENT
///
/// Events without a summary or a readable DTSTART are skipped.
fn parse_event(event: &IcalEvent) -> Option<(NaiveDate, CalendarEvent)> {
    let mut summary = None;
    let mut description = None;
    let mut start = None;

    for property in &event.properties {
        match property.name.as_str() {
            "SUMMARY" => summary = property.value.as_deref().map(unescape),
            "DESCRIPTION" => description = property.value.as_deref().map(unescape),
            "DTSTART" => start = property.value.as_deref().and_then(parse_date),
            _ => {}
        }
    }

    let summary = summary.filter(|s| !s.trim().is_empty())?;
    Some((
        start?,
        CalendarEvent {
            summary,
            description: description.filter(|d| !d.trim().is_empty()),
        },
    ))
}

/// Reads the date part of `20240601`, `20240601T090000` or `20240601T090000Z`
fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = value.get(..8)?;
    NaiveDate::parse_from_str(date, "%Y%m%d").ok()
}

/// Undoes RFC 5545 text escaping
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
