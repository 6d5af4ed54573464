//! # Storage Layer
//!
//! Everything the review reads from disk.
//!
//! ## Inputs
//!
//! | Data | Format | Required |
//! |------|--------|----------|
//! | Tasks | todo.txt, one task per line | yes |
//! | Completed tasks | done.txt, `x YYYY-MM-DD ...` per line | yes |
//! | Goals | `#goal +project ...` per line | yes |
//! | Calendar | iCalendar export (`.ics`) | no |
//! | Config | TOML | no |
//!
//! A required file that cannot be read aborts the review. A calendar that
//! cannot be read is reported and treated as empty.
//!
//! ## Key Types
//!
//! - [`TextFile`] - Reads a required line-oriented input
//! - [`EventSource`] - Lists calendar events for a date window
//! - [`IcsCalendar`] / [`NoCalendar`] - The shipped event sources
//! - [`Config`] - Review configuration

mod text;
mod calendar;
mod config;

pub use text::{InputError, TextFile};
pub use calendar::{CalendarError, EventSource, IcsCalendar, NoCalendar};
pub use config::{Config, ConfigError, OutputFormat, DEFAULT_DAYS, MAX_DAYS};
