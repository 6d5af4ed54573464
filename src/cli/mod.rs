//! # Command-Line Interface
//!
//! User-facing command and output formatting.
//!
//! ## Usage
//!
//! ```bash
//! goals todo.txt done.txt '#goals.txt' 7
//! goals --calendar ~/calendar.ics --today 2024-06-01
//! ```
//!
//! Paths, the day count, the calendar and the goals format can also come
//! from the config file; command-line values take precedence.
//!
//! ## Output Formats
//!
//! The `--format` flag selects:
//! - `text` (default) - The review as indented plain text
//! - `json` - The same report as one JSON object
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! goals --verbose todo.txt done.txt goals.txt
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and print the review.

mod app;
mod output;
mod review;

pub use app::{run, Cli, USAGE};
pub use output::{Output, OutputFormat};
pub use review::{generate, ReviewSettings};
