//! Per-goal aggregation of project indexes

use serde::Serialize;

use super::goal::Goal;
use super::index::ProjectIndex;
use super::registry::GoalRegistry;

/// Records gathered for each goal from the projects it declares
///
/// Goals without any indexed project have no entry; [`GoalAggregate::count`]
/// reports zero for them either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoalAggregate {
    entries: Vec<(Goal, Vec<String>)>,
}

impl GoalAggregate {
    /// Returns the records for a goal, if any project of it was indexed
    pub fn get(&self, goal: &Goal) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(g, _)| g == goal)
            .map(|(_, records)| records.as_slice())
    }

    /// Number of records for a goal; absent goals count as zero
    pub fn count(&self, goal: &Goal) -> usize {
        self.get(goal).map_or(0, <[String]>::len)
    }

    /// Iterates over goals that have an entry
    pub fn goals(&self) -> impl Iterator<Item = &Goal> {
        self.entries.iter().map(|(goal, _)| goal)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Joins the registry with an index
///
/// For every goal, the records of each declared project present in the
/// index are concatenated in declaration order. A record filed under two of
/// the goal's projects appears twice, and so does a project declared twice.
pub fn aggregate(registry: &GoalRegistry, index: &ProjectIndex) -> GoalAggregate {
    let mut entries = Vec::new();

    for (goal, projects) in registry.iter() {
        let mut records: Option<Vec<String>> = None;

        for project in projects {
            if let Some(found) = index.get(project.as_str()) {
                records.get_or_insert_with(Vec::new).extend_from_slice(found);
            }
        }

        if let Some(records) = records {
            entries.push((goal.clone(), records));
        }
    }

    GoalAggregate { entries }
}
