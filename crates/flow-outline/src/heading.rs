//! Heading detection and decomposition
//!
//! All functions here look at a single line only.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result, StateSet, TaskState};

/// The character whose repetition count is a heading's depth.
pub const MARKER: char = '*';

/// Markers, the whitespace after them, and the remainder of the line.
static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*+)(\s+)(.*)$").expect("Invalid heading regex"));

/// A heading line split into its structural parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub depth: usize,
    pub state: Option<TaskState>,
    pub title: String,
}

/// True if `line` starts with one or more markers immediately followed by
/// whitespace.
pub fn is_heading(line: &str) -> bool {
    let rest = line.trim_start_matches(MARKER);
    rest.len() < line.len() && rest.starts_with(char::is_whitespace)
}

/// Number of leading markers, or 0 if `line` is not a heading.
pub fn heading_depth(line: &str) -> usize {
    if is_heading(line) {
        line.len() - line.trim_start_matches(MARKER).len()
    } else {
        0
    }
}

/// The trimmed text after the markers, or `None` if `line` is not a heading.
pub fn heading_remainder(line: &str) -> Option<&str> {
    HEADING_REGEX
        .captures(line)
        .and_then(|caps| caps.get(3))
        .map(|m| m.as_str().trim())
}

/// Parse a heading, treating the first token as a status keyword when it is
/// a member of `states`.
pub fn parse_heading(line: &str, states: &StateSet) -> Option<Heading> {
    let caps = HEADING_REGEX.captures(line)?;
    let depth = caps[1].len();
    let remainder = caps[3].trim();

    let (keyword, rest) = match remainder.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest),
        None => (remainder, ""),
    };

    let heading = match states.parse(keyword) {
        Ok(state) => Heading {
            depth,
            state: Some(state),
            title: rest.trim().to_string(),
        },
        Err(_) => Heading {
            depth,
            state: None,
            title: remainder.to_string(),
        },
    };
    Some(heading)
}

/// Rewrite the status keyword of the heading at `index` in `lines`.
///
/// An existing recognised keyword is replaced; otherwise `state` is inserted
/// right after the markers. Every other byte of the line is kept.
pub fn replace_state(lines: &[String], index: usize, state: &TaskState, states: &StateSet) -> Result<String> {
    let line = &lines[index];
    let caps = HEADING_REGEX.captures(line).ok_or_else(|| Error::MalformedHeading {
        line: index + 1,
        text: line.clone(),
    })?;
    let markers = &caps[1];
    let separator = &caps[2];
    let remainder = &caps[3];

    let token_end = remainder
        .find(char::is_whitespace)
        .unwrap_or(remainder.len());
    let token = &remainder[..token_end];

    let rewritten = if states.contains(token) {
        format!("{markers}{separator}{state}{}", &remainder[token_end..])
    } else if remainder.is_empty() {
        format!("{markers}{separator}{state}")
    } else {
        format!("{markers}{separator}{state} {remainder}")
    };
    Ok(rewritten)
}
