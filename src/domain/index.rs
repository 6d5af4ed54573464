//! Project indexes over task lines and calendar events
//!
//! An index maps each project tag to the records that mention it. Two
//! indexes are built per review: completed work (done.txt plus past events)
//! and prioritized work (todo.txt plus upcoming events).
//!
//! A record mentioning several projects is filed under each of them.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::event::CalendarEvent;
use super::tag::{is_priority_line, project_tokens};

/// Date format used by todo.txt
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The trailing days a review covers, as todo.txt dates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    dates: Vec<String>,
}

impl DateWindow {
    /// `days` dates ending with `today`, newest first
    ///
    /// Stops early at the first representable date.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let dates = (0..u64::from(days))
            .map_while(|d| today.checked_sub_days(Days::new(d)))
            .map(|date| date.format(DATE_FORMAT).to_string())
            .collect();
        Self { dates }
    }

    /// Returns true if the `YYYY-MM-DD` string falls in the window
    pub fn contains(&self, date: &str) -> bool {
        self.dates.iter().any(|d| d == date)
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Insertion-ordered mapping from project tag to records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectIndex {
    entries: Vec<(String, Vec<String>)>,
}

impl ProjectIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a record under a tag
    pub fn insert(&mut self, tag: &str, record: impl Into<String>) {
        let record = record.into();
        match self.entries.iter_mut().find(|(t, _)| t == tag) {
            Some((_, records)) => records.push(record),
            None => self.entries.push((tag.to_string(), vec![record])),
        }
    }

    /// Appends every record of another index, tag by tag
    pub fn merge(&mut self, other: ProjectIndex) {
        for (tag, records) in other.entries {
            for record in records {
                self.insert(&tag, record);
            }
        }
    }

    /// Returns the records filed under a tag
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, records)| records.as_slice())
    }

    /// Returns true if the tag has any records
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Iterates over tags in first-seen order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(tag, _)| tag.as_str())
    }

    /// Iterates over tags with their records
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(tag, records)| (tag.as_str(), records.as_slice()))
    }

    /// Returns the number of distinct tags
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total records across all tags (a record counts once per tag)
    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|(_, records)| records.len()).sum()
    }
}

/// Completed-task lines whose completion date is in the window
///
/// A done.txt line reads `x 2024-06-01 [created] text`; lines with fewer
/// than three tokens never qualify.
pub fn select_completions<'a, S: AsRef<str>>(lines: &'a [S], window: &DateWindow) -> Vec<&'a str> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| {
            let tokens: Vec<_> = line.split_whitespace().collect();
            tokens.len() > 2 && window.contains(tokens[1])
        })
        .collect()
}

/// Indexes done.txt lines completed inside the window
pub fn index_completions<S: AsRef<str>>(lines: &[S], window: &DateWindow) -> ProjectIndex {
    index_lines(select_completions(lines, window))
}

/// Indexes todo.txt lines carrying a priority marker
pub fn index_prioritized_tasks<S: AsRef<str>>(lines: &[S]) -> ProjectIndex {
    index_lines(lines.iter().map(|line| line.as_ref()).filter(|line| {
        let tokens: Vec<_> = line.split_whitespace().collect();
        is_priority_line(&tokens)
    }))
}

/// Indexes calendar events under the tags in their summary or description
pub fn index_events(events: &[CalendarEvent]) -> ProjectIndex {
    let mut index = ProjectIndex::new();
    for (tag, record) in event_records(events) {
        index.insert(&tag, record);
    }
    index
}

/// One `(tag, record)` pair per project tag occurrence in each event
pub fn event_records(events: &[CalendarEvent]) -> Vec<(String, String)> {
    events
        .iter()
        .flat_map(|event| {
            event
                .project_tags()
                .map(|tag| (tag.to_string(), event.record_for(tag)))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Counts todo.txt lines that start with a priority marker
pub fn count_priority_marked_lines<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .filter(|line| {
            let tokens: Vec<_> = line.as_ref().split_whitespace().collect();
            is_priority_line(&tokens)
        })
        .count()
}

/// Counts project tags across events; an event with two tags counts twice
pub fn count_project_tagged_events(events: &[CalendarEvent]) -> usize {
    events.iter().map(|event| event.project_tags().count()).sum()
}

fn index_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> ProjectIndex {
    let mut index = ProjectIndex::new();
    for line in lines {
        for tag in project_tokens(line) {
            index.insert(tag, line);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn window(dates: &[&str]) -> DateWindow {
        DateWindow {
            dates: dates.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn trailing_window_includes_today() {
        let w = DateWindow::trailing(date("2024-03-02"), 3);
        assert_eq!(w.dates(), &["2024-03-02", "2024-03-01", "2024-02-29"]);
        assert!(w.contains("2024-02-29"));
        assert!(!w.contains("2024-02-28"));
    }

    #[test]
    fn trailing_window_of_one_day() {
        let w = DateWindow::trailing(date("2024-06-01"), 1);
        assert_eq!(w.len(), 1);
        assert!(w.contains("2024-06-01"));
    }

    #[test]
    fn trailing_window_stops_at_min_date() {
        let w = DateWindow::trailing(NaiveDate::MIN, 7);
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn completion_in_window_is_indexed() {
        let lines = ["x 2024-01-02 2024-01-01 Did +ProjA thing"];

        let index = index_completions(&lines, &window(&["2024-01-02"]));
        assert_eq!(index.get("+ProjA"), Some(&[lines[0].to_string()][..]));

        let index = index_completions(&lines, &window(&["2024-01-03"]));
        assert!(index.is_empty());
    }

    #[test]
    fn short_or_malformed_done_lines_are_excluded() {
        let lines = [
            "",
            "x 2024-01-02",
            "x yesterday Ran +Run",
            "x 2024-1-2 Ran +Run",
        ];
        let w = window(&["2024-01-02"]);
        assert!(select_completions(&lines, &w).is_empty());
    }

    #[test]
    fn completion_without_project_is_selected_but_not_indexed() {
        let lines = ["x 2024-01-02 Paid the bills"];
        let w = window(&["2024-01-02"]);

        assert_eq!(select_completions(&lines, &w).len(), 1);
        assert!(index_completions(&lines, &w).is_empty());
    }

    #[test]
    fn line_with_two_projects_is_indexed_under_both() {
        let lines = ["x 2024-01-02 Ran with club +Run p:Club"];
        let index = index_completions(&lines, &window(&["2024-01-02"]));

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("+Run").unwrap().len(), 1);
        assert_eq!(index.get("p:Club").unwrap().len(), 1);
        assert_eq!(index.record_count(), 2);
    }

    #[test]
    fn prioritized_index_ignores_unmarked_lines() {
        let lines = [
            "(A) Book flights +Trip",
            "Pack bags +Trip",
            "(B) Draft intro +Book",
            "(C) Call mom",
        ];
        let index = index_prioritized_tasks(&lines);

        let tags: Vec<_> = index.tags().collect();
        assert_eq!(tags, vec!["+Trip", "+Book"]);
        assert_eq!(index.get("+Trip"), Some(&[lines[0].to_string()][..]));
        assert_eq!(count_priority_marked_lines(&lines), 3);
    }

    #[test]
    fn index_preserves_record_order() {
        let lines = ["(A) one +P", "(B) two +Q", "(C) three +P"];
        let index = index_prioritized_tasks(&lines);
        assert_eq!(
            index.get("+P").unwrap(),
            &["(A) one +P".to_string(), "(C) three +P".to_string()]
        );
    }

    #[test]
    fn events_are_indexed_per_tag() {
        let events = vec![
            CalendarEvent::new("Track session +Run"),
            CalendarEvent::new("Dentist"),
            CalendarEvent::new("Swim +Swim").with_description("+Tri prep"),
        ];
        let index = index_events(&events);

        assert_eq!(index.get("+Run"), Some(&["Track session +Run".to_string()][..]));
        assert_eq!(index.get("+Swim"), Some(&["Swim +Tri prep +Swim".to_string()][..]));
        assert_eq!(index.get("+Tri"), Some(&["Swim +Swim prep +Tri".to_string()][..]));
        assert_eq!(count_project_tagged_events(&events), 3);
    }

    #[test]
    fn event_records_pair_tag_and_text() {
        let events = vec![CalendarEvent::new("+Run Intervals")];
        assert_eq!(
            event_records(&events),
            vec![("+Run".to_string(), "Intervals +Run".to_string())]
        );
    }

    #[test]
    fn merge_appends_and_keeps_first_seen_order() {
        let mut index = ProjectIndex::new();
        index.insert("+A", "a1");
        index.insert("+B", "b1");

        let mut other = ProjectIndex::new();
        other.insert("+C", "c1");
        other.insert("+A", "a2");

        index.merge(other);

        let tags: Vec<_> = index.tags().collect();
        assert_eq!(tags, vec!["+A", "+B", "+C"]);
        assert_eq!(index.get("+A").unwrap(), &["a1".to_string(), "a2".to_string()]);
    }

    #[test]
    fn empty_inputs_produce_empty_index() {
        let lines: [&str; 0] = [];
        assert!(index_prioritized_tasks(&lines).is_empty());
        assert_eq!(count_priority_marked_lines(&lines), 0);
        assert_eq!(count_project_tagged_events(&[]), 0);
    }
}
