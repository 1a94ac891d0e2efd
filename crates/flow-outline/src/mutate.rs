//! Task mutations
//!
//! Each mutator takes a [`Document`] and returns a new one; the input is
//! never modified, so a failed mutation leaves nothing half-applied.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::heading::{MARKER, replace_state};
use crate::section::find_child_section;
use crate::task::find_task;
use crate::{Document, Error, Result, StateSet};

/// Subsection that receives log entries.
pub const LOG_SECTION: &str = "Log";

/// Leading heading markers on a line of user text.
static LEADING_MARKERS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*+\s+").expect("Invalid leading marker regex"));

/// Set the status keyword of task `id` to `new_state`.
///
/// `new_state` is validated before the task is looked up. Only the keyword
/// token changes; markers, spacing, title and tags are kept.
pub fn set_task_state(
    document: &Document,
    id: &str,
    new_state: &str,
    states: &StateSet,
) -> Result<Document> {
    let new_state = states.parse(new_state)?;
    let task = find_task(document, id, states)?;

    let mut lines = document.lines().to_vec();
    lines[task.range.start] = replace_state(&lines, task.range.start, &new_state, states)?;

    tracing::debug!(id, state = %new_state, line = task.range.start + 1, "Rewrote task state");
    Ok(document.with_lines(lines))
}

/// Append a timestamped bullet to the `Log` subsection of task `id`,
/// creating the subsection at the end of the task when it is missing.
pub fn append_task_log(
    document: &Document,
    id: &str,
    entry: &str,
    timestamp: DateTime<Utc>,
    states: &StateSet,
) -> Result<Document> {
    let task = find_task(document, id, states)?;

    let text = sanitize_log_entry(entry);
    if text.is_empty() {
        return Err(Error::EmptyLogEntry { id: id.to_string() });
    }
    let bullet = format!("- [{}] {}", format_timestamp(timestamp), text);

    let mut lines = document.lines().to_vec();
    let log_end = match find_child_section(&lines, task.range, task.depth, LOG_SECTION) {
        Some(log) => log.end,
        None => {
            // The new heading and its blank line are the whole Log range: the
            // line after them opens a heading no deeper than the task, or is EOF.
            let at = task.range.end + 1;
            let heading = format!(
                "{} {}",
                MARKER.to_string().repeat(task.depth + 1),
                LOG_SECTION
            );
            lines.splice(at..at, [heading, String::new()]);
            tracing::debug!(id, line = at + 1, "Created Log section");
            at + 1
        }
    };

    let mut insert_at = log_end + 1;
    if !lines[log_end].trim().is_empty() {
        lines.insert(insert_at, String::new());
        insert_at += 1;
    }
    lines.insert(insert_at, bullet);

    tracing::debug!(id, line = insert_at + 1, "Appended log entry");
    Ok(document.with_lines(lines))
}

/// Flatten user text into a single safe line.
///
/// Line terminators are normalized, leading heading markers are stripped
/// from every line so no line can be read back as a heading, blank lines are
/// dropped and the rest is joined with single spaces.
pub fn sanitize_log_entry(entry: &str) -> String {
    entry
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(|line| LEADING_MARKERS_REGEX.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2026-01-02T03:04:05.678Z`.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
