//! Calendar events as seen by the review
//!
//! Only the summary and description matter: project tags written in either
//! one link the event to a goal, just like a task line.

use serde::{Deserialize, Serialize};

use super::tag::project_tokens;

/// A calendar event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event title
    pub summary: String,

    /// Event notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Iterates over the words of the summary, then the description
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.summary
            .split_whitespace()
            .chain(self.description.iter().flat_map(|d| d.split_whitespace()))
    }

    /// Project tags in the summary and description, in order
    pub fn project_tags(&self) -> impl Iterator<Item = &str> {
        project_tokens(&self.summary).chain(
            self.description
                .iter()
                .flat_map(|d| project_tokens(d.as_str())),
        )
    }

    /// Renders the event as a task-like record filed under `tag`
    ///
    /// Every occurrence of the tag is dropped from the text and a single
    /// copy is appended, so `+Run Morning +Run` reads `Morning +Run`.
    pub fn record_for(&self, tag: &str) -> String {
        let mut record = self
            .tokens()
            .filter(|token| *token != tag)
            .collect::<Vec<_>>()
            .join(" ");

        if !record.is_empty() {
            record.push(' ');
        }
        record.push_str(tag);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_cover_summary_and_description() {
        let event = CalendarEvent::new("Long run +Running").with_description("with p:Club");
        let tokens: Vec<_> = event.tokens().collect();
        assert_eq!(tokens, vec!["Long", "run", "+Running", "with", "p:Club"]);
    }

    #[test]
    fn project_tags_from_both_fields() {
        let event = CalendarEvent::new("Long run +Running").with_description("with p:Club");
        let tags: Vec<_> = event.project_tags().collect();
        assert_eq!(tags, vec!["+Running", "p:Club"]);
    }

    #[test]
    fn untagged_event_has_no_tags() {
        let event = CalendarEvent::new("Dentist");
        assert_eq!(event.project_tags().count(), 0);
    }

    #[test]
    fn record_moves_tag_to_the_end() {
        let event = CalendarEvent::new("+Running Long run");
        assert_eq!(event.record_for("+Running"), "Long run +Running");
    }

    #[test]
    fn record_collapses_duplicate_tag() {
        let event = CalendarEvent::new("+Run Morning +Run");
        assert_eq!(event.record_for("+Run"), "Morning +Run");
    }

    #[test]
    fn record_keeps_other_tags() {
        let event = CalendarEvent::new("Swim +Swim").with_description("+Tri prep");
        assert_eq!(event.record_for("+Tri"), "Swim +Swim prep +Tri");
    }

    #[test]
    fn record_of_bare_tag() {
        let event = CalendarEvent::new("+Run");
        assert_eq!(event.record_for("+Run"), "+Run");
    }
}
