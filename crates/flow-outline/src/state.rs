//! Status keywords
//!
//! The set of recognised keywords is configuration. A [`TaskState`] can only
//! be obtained from a [`StateSet`], so holding one proves membership.

use std::fmt;

use crate::{Error, Result};

/// Keywords recognised when no set is configured.
pub const DEFAULT_STATES: [&str; 6] = [
    "BACKLOG",
    "TODO",
    "IN-PROGRESS",
    "IN-REVIEW",
    "DONE",
    "CANCELLED",
];

/// A status keyword known to be a member of some [`StateSet`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskState(String);

impl TaskState {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TaskState {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered set of allowed status keywords.
///
/// Keywords are matched case-sensitively as whole whitespace-delimited
/// tokens, so a keyword containing whitespace can never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSet {
    states: Vec<String>,
}

impl StateSet {
    /// Build a set from keywords. Entries are trimmed; blanks and repeats are
    /// dropped and first-seen order is kept.
    pub fn new<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for state in states {
            let state = state.as_ref().trim();
            if !state.is_empty() && !unique.iter().any(|s| s == state) {
                unique.push(state.to_string());
            }
        }
        Self { states: unique }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.states.iter().any(|s| s == keyword)
    }

    /// Validate `keyword` against the set.
    pub fn parse(&self, keyword: &str) -> Result<TaskState> {
        if self.contains(keyword) {
            Ok(TaskState(keyword.to_string()))
        } else {
            Err(Error::InvalidState {
                state: keyword.to_string(),
                allowed: self.states.clone(),
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for StateSet {
    fn default() -> Self {
        Self::new(DEFAULT_STATES)
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.states.join(", "))
    }
}
