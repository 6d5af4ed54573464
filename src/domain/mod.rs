//! Domain models for the goal review
//!
//! Contains the parsing, indexing and reporting logic without any I/O concerns.

mod tag;
mod goal;
mod registry;
mod event;
mod index;
mod aggregate;
mod report;
mod review;

pub use tag::{is_priority_line, is_project_token, project_tokens};
pub use goal::{Goal, ProjectTag, TokenError};
pub use registry::{GoalRegistry, GoalsFormat, RegistryError};
pub use event::CalendarEvent;
pub use index::{
    count_priority_marked_lines, count_project_tagged_events, event_records, index_completions,
    index_events, index_prioritized_tasks, select_completions, DateWindow, ProjectIndex,
    DATE_FORMAT,
};
pub use aggregate::{aggregate, GoalAggregate};
pub use report::{GoalSection, ProjectSection, Report, ReportInput, Source, Summary, Warning};
pub use review::{review, EventWindow, ReviewSources};
