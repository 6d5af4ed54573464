//! The review pipeline
//!
//! Raw lines and events go in, a [`Report`] comes out:
//!
//! ```text
//! done.txt + past events ──► completed index ──┐
//!                                              ├─► goal aggregates ──► report
//! todo.txt + upcoming events ► prioritized ────┘
//! ```
//!
//! Nothing here touches the filesystem or the clock; callers pass `today`.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::aggregate::aggregate;
use super::event::CalendarEvent;
use super::index::{
    count_priority_marked_lines, count_project_tagged_events, index_completions, index_events,
    index_prioritized_tasks, select_completions, DateWindow,
};
use super::registry::GoalRegistry;
use super::report::{Report, ReportInput};

/// Inclusive date range handed to a calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl EventWindow {
    /// `today - days` through `today`, clamped to the earliest date
    pub fn past(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today
                .checked_sub_days(Days::new(days.into()))
                .unwrap_or(NaiveDate::MIN),
            end: today,
        }
    }

    /// The day after `today` through `today + days`, clamped to the latest date
    ///
    /// On the latest representable date the window is empty.
    pub fn upcoming(today: NaiveDate, days: u32) -> Self {
        let Some(start) = today.checked_add_days(Days::new(1)) else {
            return Self {
                start: NaiveDate::MAX,
                end: today,
            };
        };
        Self {
            start,
            end: today
                .checked_add_days(Days::new(days.into()))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Returns true if the date is inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The already-loaded inputs of one review
#[derive(Debug)]
pub struct ReviewSources<'a, S: AsRef<str>> {
    pub todo: &'a [S],
    pub done: &'a [S],
    pub registry: &'a GoalRegistry,
    pub past_events: &'a [CalendarEvent],
    pub upcoming_events: &'a [CalendarEvent],
}

/// Runs the review for the `days` ending on `today`
pub fn review<S: AsRef<str>>(today: NaiveDate, days: u32, sources: &ReviewSources<'_, S>) -> Report {
    let window = DateWindow::trailing(today, days);

    let mut completed = index_completions(sources.done, &window);
    completed.merge(index_events(sources.past_events));

    let mut prioritized = index_prioritized_tasks(sources.todo);
    prioritized.merge(index_events(sources.upcoming_events));

    let completed_total = select_completions(sources.done, &window).len()
        + count_project_tagged_events(sources.past_events);
    let prioritized_total = count_priority_marked_lines(sources.todo)
        + count_project_tagged_events(sources.upcoming_events);

    let goal_completed = aggregate(sources.registry, &completed);
    let goal_prioritized = aggregate(sources.registry, &prioritized);

    Report::build(&ReportInput {
        days,
        registry: sources.registry,
        completed: &completed,
        prioritized: &prioritized,
        goal_completed: &goal_completed,
        goal_prioritized: &goal_prioritized,
        completed_total,
        prioritized_total,
    })
}
