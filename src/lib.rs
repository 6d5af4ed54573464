//! Goal Review - a goals review for todo.txt users
//!
//! Joins completed and prioritized tasks (and optionally calendar events)
//! to the goals they serve through their `+project` tags, then reports
//! which goals moved forward and which are not prioritized.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Goal, GoalRegistry, ProjectIndex, ProjectTag, Report};
