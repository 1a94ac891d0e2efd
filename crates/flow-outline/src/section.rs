//! Section boundaries, metadata blocks and named subsections

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::heading::{heading_depth, heading_remainder, is_heading};

pub const PROPERTIES_START: &str = ":PROPERTIES:";
pub const PROPERTIES_END: &str = ":END:";

/// `:KEY: value` inside a metadata block, matched against the trimmed line.
static PROPERTY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:([A-Za-z0-9_@#%-]+):(?:\s+(.*))?$").expect("Invalid property regex")
});

/// Metadata of a heading, in document order.
pub type Properties = IndexMap<String, String>;

/// Inclusive range of line indices owned by a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

/// Range owned by the heading at `heading_index`: up to the line before the
/// next heading of equal or shallower depth, or the last line.
///
/// # Panics
///
/// Panics if `heading_index` is out of bounds.
pub fn compute_range(lines: &[String], heading_index: usize) -> LineRange {
    let depth = heading_depth(&lines[heading_index]);
    let end = lines
        .iter()
        .enumerate()
        .skip(heading_index + 1)
        .find(|(_, line)| is_heading(line) && heading_depth(line) <= depth)
        .map(|(next, _)| next - 1)
        .unwrap_or(lines.len() - 1);

    LineRange {
        start: heading_index,
        end,
    }
}

/// Metadata block of the heading starting `range`.
///
/// Only the heading's own body is searched: both the `:PROPERTIES:` scan and
/// the `:END:` scan stop at the next heading of any depth. A block that is
/// never closed yields no properties.
pub fn find_properties(lines: &[String], range: LineRange) -> Properties {
    let body = range.start + 1..range.end + 1;

    let Some(open) = body
        .clone()
        .take_while(|&i| !is_heading(&lines[i]))
        .find(|&i| lines[i].trim() == PROPERTIES_START)
    else {
        return Properties::new();
    };

    let mut properties = Properties::new();
    for line in &lines[open + 1..body.end] {
        if is_heading(line) {
            break;
        }
        let trimmed = line.trim();
        if trimmed == PROPERTIES_END {
            return properties;
        }
        if let Some(caps) = PROPERTY_REGEX.captures(trimmed) {
            let value = caps.get(2).map_or("", |m| m.as_str().trim());
            properties.insert(caps[1].to_string(), value.to_string());
        }
    }

    tracing::warn!(
        line = open + 1,
        "Metadata block without {} ignored",
        PROPERTIES_END
    );
    Properties::new()
}

/// Direct child heading of the parent at `parent` whose remainder equals
/// `name` exactly. Deeper descendants with the same name are not matched.
pub fn find_child_section(
    lines: &[String],
    parent: LineRange,
    parent_depth: usize,
    name: &str,
) -> Option<LineRange> {
    let child_depth = parent_depth + 1;
    (parent.start + 1..parent.end + 1)
        .find(|&i| heading_depth(&lines[i]) == child_depth && heading_remainder(&lines[i]) == Some(name))
        .map(|start| LineRange {
            start,
            end: compute_range(lines, start).end.min(parent.end),
        })
}

/// Body of a section without its heading line, trimmed. Nested headings are
/// kept verbatim.
pub fn section_body(lines: &[String], range: LineRange) -> String {
    lines[range.start + 1..range.end + 1]
        .join("\n")
        .trim()
        .to_string()
}
