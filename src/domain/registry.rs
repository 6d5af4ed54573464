//! Goal registry parsed from a `#goals.txt` file
//!
//! Each line lists one goal followed by the projects that move it forward:
//!
//! ```text
//! #GetFit +Running +Climbing
//! #WriteBook +Draft +Editing
//! ```
//!
//! Two parsing policies exist. [`GoalsFormat::Strict`] validates every line
//! and keeps goals in the order they are first declared. [`GoalsFormat::Legacy`]
//! accepts any token layout and sorts goals by name.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::goal::{Goal, ProjectTag};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Invalid goals file {file}, line {line}: expected a #goal, got '{token}'")]
    MissingGoal {
        file: String,
        line: usize,
        token: String,
    },

    #[error("Invalid goals file {file}, line {line}: goal {goal} lists '{token}', which is not a +project")]
    NotAProject {
        file: String,
        line: usize,
        goal: String,
        token: String,
    },
}

/// Parsing policy for the goals file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalsFormat {
    /// `#goal +project...` per line, validated, declaration order
    #[default]
    Strict,
    /// Any token layout, goals sorted by name
    Legacy,
}

impl GoalsFormat {
    pub fn as_str(&self) -> &str {
        match self {
            GoalsFormat::Strict => "strict",
            GoalsFormat::Legacy => "legacy",
        }
    }
}

/// Ordered mapping from goal to its declared projects
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoalRegistry {
    entries: Vec<(Goal, Vec<ProjectTag>)>,
}

impl GoalRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses goals file lines with the given policy
    ///
    /// `file` only labels error messages.
    pub fn parse<S: AsRef<str>>(
        file: &str,
        lines: &[S],
        format: GoalsFormat,
    ) -> Result<Self, RegistryError> {
        match format {
            GoalsFormat::Strict => Self::parse_strict(file, lines),
            GoalsFormat::Legacy => Ok(Self::parse_legacy(lines)),
        }
    }

    /// Strict per-line parse; the first bad token aborts the whole build
    pub fn parse_strict<S: AsRef<str>>(file: &str, lines: &[S]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        for (idx, line) in lines.iter().enumerate() {
            let mut tokens = line.as_ref().split_whitespace();
            let Some(first) = tokens.next() else {
                continue;
            };

            let goal: Goal = first.parse().map_err(|_| RegistryError::MissingGoal {
                file: file.to_string(),
                line: idx + 1,
                token: first.to_string(),
            })?;

            let mut projects = Vec::new();
            for token in tokens {
                // p: and p- tags are valid in task files but not here
                let project = match token.strip_prefix('+') {
                    Some(_) => token.parse::<ProjectTag>().ok(),
                    None => None,
                };
                let project = project.ok_or_else(|| RegistryError::NotAProject {
                    file: file.to_string(),
                    line: idx + 1,
                    goal: goal.to_string(),
                    token: token.to_string(),
                })?;
                projects.push(project);
            }

            registry.extend(goal, projects);
        }

        Ok(registry)
    }

    /// Lenient scan: a `+project` token becomes current, a `#goal` token
    /// claims the current project. Goals are sorted afterwards.
    pub fn parse_legacy<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut registry = Self::new();
        let mut current: Option<ProjectTag> = None;

        for line in lines {
            for token in line.as_ref().split_whitespace() {
                if token.starts_with('+') {
                    current = token.parse().ok();
                }
                if let Ok(goal) = token.parse::<Goal>() {
                    registry.extend(goal, current.iter().cloned());
                }
            }
        }

        registry.entries.sort_by(|a, b| a.0.cmp(&b.0));
        registry
    }

    /// Adds projects to a goal, creating it at the end if new
    ///
    /// A project already listed under the goal is not added again.
    pub fn extend(&mut self, goal: Goal, projects: impl IntoIterator<Item = ProjectTag>) {
        let index = match self.entries.iter().position(|(g, _)| *g == goal) {
            Some(index) => index,
            None => {
                self.entries.push((goal, Vec::new()));
                self.entries.len() - 1
            }
        };

        let existing = &mut self.entries[index].1;
        for project in projects {
            if !existing.contains(&project) {
                existing.push(project);
            }
        }
    }

    /// Iterates over goals in registry order
    pub fn goals(&self) -> impl Iterator<Item = &Goal> {
        self.entries.iter().map(|(goal, _)| goal)
    }

    /// Iterates over goals with their projects
    pub fn iter(&self) -> impl Iterator<Item = (&Goal, &[ProjectTag])> {
        self.entries
            .iter()
            .map(|(goal, projects)| (goal, projects.as_slice()))
    }

    /// Returns the projects declared for a goal
    pub fn projects(&self, goal: &Goal) -> Option<&[ProjectTag]> {
        self.entries
            .iter()
            .find(|(g, _)| g == goal)
            .map(|(_, projects)| projects.as_slice())
    }

    /// Returns true if any goal declares this project
    pub fn contains_project(&self, tag: &str) -> bool {
        self.entries
            .iter()
            .any(|(_, projects)| projects.iter().any(|p| p == tag))
    }

    /// Returns the number of goals
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no goals are declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn goal(s: &str) -> Goal {
        s.parse().unwrap()
    }

    fn tags(registry: &GoalRegistry, g: &str) -> Vec<String> {
        registry
            .projects(&goal(g))
            .unwrap()
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn strict_parse_keeps_declaration_order() {
        let lines = ["#Work +Ship", "#Health +Run +Lift", "#Art +Paint"];
        let registry = GoalRegistry::parse_strict("goals.txt", &lines).unwrap();

        let goals: Vec<_> = registry.goals().map(|g| g.as_str()).collect();
        assert_eq!(goals, vec!["#Work", "#Health", "#Art"]);
        assert_eq!(tags(&registry, "#Health"), vec!["+Run", "+Lift"]);
    }

    #[test]
    fn strict_parse_accumulates_repeated_goal() {
        let lines = ["#Health +Run", "#Work +Ship", "#Health +Lift +Run"];
        let registry = GoalRegistry::parse_strict("goals.txt", &lines).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(tags(&registry, "#Health"), vec!["+Run", "+Lift"]);
    }

    #[test]
    fn redeclared_project_is_listed_once() {
        let lines = ["#Health +Run +Run", "#Health +Run"];
        let registry = GoalRegistry::parse_strict("goals.txt", &lines).unwrap();
        assert_eq!(tags(&registry, "#Health"), vec!["+Run"]);

        let registry = GoalRegistry::parse_legacy(&["+Run #Health", "+Run #Health"]);
        assert_eq!(tags(&registry, "#Health"), vec!["+Run"]);
    }

    #[test]
    fn strict_parse_skips_blank_lines() {
        let lines = ["", "   ", "#Health +Run", "\t"];
        let registry = GoalRegistry::parse_strict("goals.txt", &lines).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn strict_parse_allows_goal_without_projects() {
        let registry = GoalRegistry::parse_strict("goals.txt", &["#Someday"]).unwrap();
        assert_eq!(registry.projects(&goal("#Someday")), Some(&[][..]));
    }

    #[test]
    fn strict_parse_rejects_missing_goal() {
        let lines = ["#Health +Run", "Work +Ship"];
        let err = GoalRegistry::parse_strict("goals.txt", &lines).unwrap_err();

        assert_eq!(
            err,
            RegistryError::MissingGoal {
                file: "goals.txt".to_string(),
                line: 2,
                token: "Work".to_string(),
            }
        );
        assert!(err.to_string().contains("'Work'"));
        assert!(err.to_string().contains("goals.txt"));
    }

    #[test]
    fn strict_parse_rejects_non_plus_project() {
        let err = GoalRegistry::parse_strict("goals.txt", &["#Health +Run p:Lift"]).unwrap_err();

        assert_eq!(
            err,
            RegistryError::NotAProject {
                file: "goals.txt".to_string(),
                line: 1,
                goal: "#Health".to_string(),
                token: "p:Lift".to_string(),
            }
        );
        assert!(err.to_string().contains("#Health"));
    }

    #[test]
    fn legacy_parse_attaches_current_project_and_sorts() {
        let lines = ["+Ship #Work", "+Run #Health", "+Lift", "#Health"];
        let registry = GoalRegistry::parse_legacy(&lines);

        let goals: Vec<_> = registry.goals().map(|g| g.as_str()).collect();
        assert_eq!(goals, vec!["#Health", "#Work"]);
        assert_eq!(tags(&registry, "#Health"), vec!["+Run", "+Lift"]);
        assert_eq!(tags(&registry, "#Work"), vec!["+Ship"]);
    }

    #[test]
    fn legacy_parse_tolerates_goal_before_any_project() {
        let registry = GoalRegistry::parse_legacy(&["#Health +Run", "junk words"]);
        assert_eq!(registry.projects(&goal("#Health")), Some(&[][..]));
        assert!(!registry.contains_project("+Run"));
    }

    #[test]
    fn parse_dispatches_on_format() {
        let lines = ["Work +Ship #Work"];
        assert!(GoalRegistry::parse("g", &lines, GoalsFormat::Strict).is_err());

        let registry = GoalRegistry::parse("g", &lines, GoalsFormat::Legacy).unwrap();
        assert_eq!(tags(&registry, "#Work"), vec!["+Ship"]);
    }

    #[test]
    fn contains_project_checks_every_goal() {
        let lines = ["#Health +Run", "#Work +Ship +Run"];
        let registry = GoalRegistry::parse_strict("goals.txt", &lines).unwrap();

        assert!(registry.contains_project("+Run"));
        assert!(registry.contains_project("+Ship"));
        assert!(!registry.contains_project("+Paint"));
        assert!(!registry.contains_project("+run"));
    }

    #[test]
    fn goals_format_roundtrip() {
        assert_eq!(GoalsFormat::default(), GoalsFormat::Strict);
        assert_eq!(GoalsFormat::Legacy.as_str(), "legacy");
    }

    proptest! {
        #[test]
        fn strict_parse_is_order_preserving(names in proptest::collection::vec("[A-Z][a-z]{0,6}", 1..8)) {
            let lines: Vec<String> = names
                .iter()
                .enumerate()
                .map(|(i, n)| format!("#{} +P{}", n, i))
                .collect();
            let registry = GoalRegistry::parse_strict("goals.txt", &lines).unwrap();

            let mut expected: Vec<String> = Vec::new();
            for n in &names {
                let g = format!("#{}", n);
                if !expected.contains(&g) {
                    expected.push(g);
                }
            }
            let actual: Vec<String> = registry.goals().map(|g| g.to_string()).collect();
            prop_assert_eq!(actual, expected);

            let total: usize = registry.iter().map(|(_, p)| p.len()).sum();
            prop_assert_eq!(total, names.len());
        }
    }
}
