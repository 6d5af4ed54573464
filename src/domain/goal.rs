//! Goal and project identifiers
//!
//! Formats:
//! - Goals: `#{name}` (e.g., `#GetFit`)
//! - Projects: `+{name}`, `p:{name}` or `p-{name}` (e.g., `+Running`)
//!
//! Both are compared by exact, case-sensitive string equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::tag::is_project_token;

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("Invalid goal: expected '#{{name}}', got '{0}'")]
    InvalidGoal(String),

    #[error("Invalid project: expected '+{{name}}', 'p:{{name}}' or 'p-{{name}}', got '{0}'")]
    InvalidProject(String),
}

/// A top-level objective, written `#Name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Goal(String);

impl Goal {
    /// Returns the raw token, including the `#`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name: marker stripped, camel case split into words
    ///
    /// `#GetFit` becomes `Get Fit`, `#LearnRust2024` becomes `Learn Rust 2024`.
    pub fn display_name(&self) -> String {
        split_camel_case(self.0.trim_start_matches('#'))
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Goal {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('#') && !s.chars().any(char::is_whitespace) {
            Ok(Self(s.to_string()))
        } else {
            Err(TokenError::InvalidGoal(s.to_string()))
        }
    }
}

impl TryFrom<String> for Goal {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        goal.0
    }
}

/// A project tag such as `+Running`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectTag(String);

impl ProjectTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectTag {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_project_token(s) && !s.chars().any(char::is_whitespace) {
            Ok(Self(s.to_string()))
        } else {
            Err(TokenError::InvalidProject(s.to_string()))
        }
    }
}

impl TryFrom<String> for ProjectTag {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProjectTag> for String {
    fn from(tag: ProjectTag) -> Self {
        tag.0
    }
}

impl PartialEq<str> for ProjectTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProjectTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Inserts a space at every lower-to-upper and letter-to-digit boundary
fn split_camel_case(name: &str) -> String {
    let mut words = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if let Some(p) = prev {
            let boundary = (c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()))
                || (c.is_ascii_digit() && p.is_alphabetic());
            if boundary {
                words.push(' ');
            }
        }
        words.push(c);
        prev = Some(c);
    }

    words
}
