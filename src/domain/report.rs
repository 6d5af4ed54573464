//! Review report assembly and text rendering
//!
//! A report has four blocks, always rendered in this order:
//!
//! | Block | Content |
//! |-------|---------|
//! | Title | Review window |
//! | Summary | Totals, most/least progressed goals, goals left behind |
//! | Goals | Per goal: completed records, prioritized records by project |
//! | Warnings | Projects that belong to no goal |
//!
//! Building and rendering are separate: [`Report::build`] is pure and
//! [`Report::write_to`] writes the text form to any sink.

use std::fmt;
use std::io;

use serde::Serialize;

use super::aggregate::GoalAggregate;
use super::goal::Goal;
use super::index::ProjectIndex;
use super::registry::GoalRegistry;

const INDENT: &str = "    ";

/// Everything the report is computed from
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    /// Length of the review window in days
    pub days: u32,
    pub registry: &'a GoalRegistry,
    /// Completed records by project (done.txt and past events)
    pub completed: &'a ProjectIndex,
    /// Prioritized records by project (todo.txt and upcoming events)
    pub prioritized: &'a ProjectIndex,
    pub goal_completed: &'a GoalAggregate,
    pub goal_prioritized: &'a GoalAggregate,
    /// Completed records across all sources, tagged or not
    pub completed_total: usize,
    /// Priority-marked tasks plus tagged upcoming events
    pub prioritized_total: usize,
}

/// Which index an orphan project was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Completed,
    Prioritized,
}

/// A project referenced by tasks but declared under no goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub source: Source,
    pub project: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WARNING: Project {} not in goal.", self.project)
    }
}

/// Prioritized records of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSection {
    pub project: String,
    pub tasks: Vec<String>,
}

/// Detail block for one goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalSection {
    pub goal: Goal,
    pub name: String,
    pub done: usize,
    pub prioritized: usize,
    /// Completed records, trimmed, in aggregate order
    pub completed: Vec<String>,
    /// Prioritized records grouped by declared project
    pub projects: Vec<ProjectSection>,
}

/// Totals and goal classifications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub days: u32,
    pub goal_count: usize,
    pub completed_total: usize,
    pub prioritized_total: usize,
    pub goals_moved: Vec<String>,
    pub goals_not_moved: Vec<String>,
    pub goals_prioritized: Vec<String>,
    pub goals_not_prioritized: Vec<String>,
    /// Goals tied for the highest completed count
    pub most_progress: Vec<String>,
    /// Moved goals tied for the lowest completed count
    pub least_progress: Vec<String>,
}

/// The full review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub summary: Summary,
    pub goals: Vec<GoalSection>,
    pub warnings: Vec<Warning>,
}

impl Report {
    /// Builds the report in a single pass over the registry's goals
    pub fn build(input: &ReportInput<'_>) -> Self {
        let mut summary = Summary {
            days: input.days,
            goal_count: input.registry.len(),
            completed_total: input.completed_total,
            prioritized_total: input.prioritized_total,
            ..Summary::default()
        };
        let mut goals = Vec::with_capacity(input.registry.len());

        let mut most_total: usize = 0;
        let mut least_total: Option<usize> = None;

        for (goal, projects) in input.registry.iter() {
            let name = goal.display_name();
            let done = input.goal_completed.count(goal);
            let prioritized = input.goal_prioritized.count(goal);

            let completed: Vec<String> = input
                .goal_completed
                .get(goal)
                .unwrap_or_default()
                .iter()
                .map(|record| record.trim().to_string())
                .collect();

            if done > 0 {
                summary.goals_moved.push(name.clone());
                most_total = most_total.max(done);
                least_total = Some(least_total.map_or(done, |least| least.min(done)));
            } else {
                summary.goals_not_moved.push(name.clone());
            }

            let project_sections = if prioritized > 0 {
                summary.goals_prioritized.push(name.clone());
                projects
                    .iter()
                    .filter_map(|project| {
                        input.prioritized.get(project.as_str()).map(|tasks| ProjectSection {
                            project: project.to_string(),
                            tasks: tasks.iter().map(|t| t.trim().to_string()).collect(),
                        })
                    })
                    .collect()
            } else {
                summary.goals_not_prioritized.push(name.clone());
                Vec::new()
            };

            goals.push(GoalSection {
                goal: goal.clone(),
                name,
                done,
                prioritized,
                completed,
                projects: project_sections,
            });
        }

        // Ties are all reported
        for section in &goals {
            if most_total > 0 && section.done == most_total {
                summary.most_progress.push(section.name.clone());
            }
            if section.done > 0 && Some(section.done) == least_total {
                summary.least_progress.push(section.name.clone());
            }
        }

        let warnings = orphan_projects(input.registry, input.completed, Source::Completed)
            .chain(orphan_projects(
                input.registry,
                input.prioritized,
                Source::Prioritized,
            ))
            .collect();

        Self {
            title: format!("Goal Review for the past {} days", input.days),
            summary,
            goals,
            warnings,
        }
    }

    /// Writes the text form of the report
    pub fn write_to<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self)
    }

    /// Returns the text form of the report
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn title_block(&self) -> TextBlock {
        let mut block = TextBlock::default();
        block.heading(&self.title, '=');
        block
    }

    fn summary_block(&self) -> TextBlock {
        let s = &self.summary;
        let mut block = TextBlock::default();

        block.heading("Summary", '-');
        block.line(format!(
            "{} completed tasks moved {} out of {} goals forward.",
            s.completed_total,
            s.goals_moved.len(),
            s.goal_count
        ));
        block.line(format!(
            "{} tasks are prioritized which will move {} out of {} goals forward.",
            s.prioritized_total,
            s.goals_prioritized.len(),
            s.goal_count
        ));
        if s.most_progress.is_empty() {
            block.line("No goals moved forward.");
        } else {
            block.line(format!(
                "Made the most progress on {} and the least on {}",
                s.most_progress.join(" & "),
                s.least_progress.join(" & ")
            ));
        }

        if !s.goals_not_moved.is_empty() {
            block.blank();
            block.line("Goals with no progress:");
            for name in &s.goals_not_moved {
                block.line(format!("{}{}", INDENT, name));
            }
        }

        if !s.goals_not_prioritized.is_empty() {
            block.blank();
            block.line("Goals that are not prioritized:");
            for name in &s.goals_not_prioritized {
                block.line(format!("{}{}", INDENT, name));
            }
        }

        block
    }

    fn goals_block(&self) -> TextBlock {
        let mut block = TextBlock::default();

        for (i, section) in self.goals.iter().enumerate() {
            if i > 0 {
                block.blank();
            }

            block.heading(
                &format!(
                    "{} - {} done, {} prioritized",
                    section.name, section.done, section.prioritized
                ),
                '=',
            );

            if section.done > 0 {
                block.blank();
                block.line("Completed:");
                for record in &section.completed {
                    block.line(record);
                }
            } else {
                block.line("No completed tasks.");
            }

            if section.prioritized > 0 {
                block.blank();
                block.line("Prioritized:");
                for project in &section.projects {
                    block.line(&project.project);
                    for task in &project.tasks {
                        block.line(format!("{}{}", INDENT, task));
                    }
                }
            } else {
                block.line("No prioritized tasks.");
            }
        }

        block
    }

    fn warnings_block(&self) -> TextBlock {
        let mut block = TextBlock::default();
        for warning in &self.warnings {
            block.line(warning.to_string());
        }
        block
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks = [
            self.title_block(),
            self.summary_block(),
            self.goals_block(),
            self.warnings_block(),
        ];

        let mut first = true;
        for block in blocks.iter().filter(|b| !b.is_empty()) {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}

fn orphan_projects<'a>(
    registry: &'a GoalRegistry,
    index: &'a ProjectIndex,
    source: Source,
) -> impl Iterator<Item = Warning> + 'a {
    index
        .tags()
        .filter(|tag| !registry.contains_project(tag))
        .map(move |tag| Warning {
            source,
            project: tag.to_string(),
        })
}

/// Indented report lines
#[derive(Debug, Default)]
struct TextBlock {
    lines: Vec<String>,
}

impl TextBlock {
    fn line(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("{}{}", INDENT, text.as_ref()));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// A line underlined with `rule` to the same width
    fn heading(&mut self, text: &str, rule: char) {
        self.line(text);
        self.line(rule.to_string().repeat(text.chars().count()));
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
