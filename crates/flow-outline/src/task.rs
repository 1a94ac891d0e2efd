//! Task extraction
//!
//! A task is a heading whose metadata block carries a non-empty `ID`. Tasks
//! are derived from a [`Document`] on demand and are never cached.

use crate::heading::{is_heading, parse_heading};
use crate::section::{compute_range, find_child_section, find_properties, section_body};
use crate::{Document, Error, LineRange, Properties, Result, StateSet, TaskState};

/// Property that turns a heading into a task.
pub const ID_PROPERTY: &str = "ID";

/// Subsection exported by `get_task_context`.
pub const AGENT_CONTEXT_SECTION: &str = "Agent Context";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub depth: usize,
    /// The heading line exactly as it appears in the document.
    pub heading: String,
    pub title: String,
    pub state: Option<TaskState>,
    pub properties: Properties,
    pub range: LineRange,
}

/// Read-only view pairing a document with the state set used to parse it.
#[derive(Debug, Clone, Copy)]
pub struct Outline<'a> {
    document: &'a Document,
    states: &'a StateSet,
}

impl<'a> Outline<'a> {
    pub fn new(document: &'a Document, states: &'a StateSet) -> Self {
        Self { document, states }
    }

    /// Every task in document order. Duplicate IDs are yielded once per
    /// occurrence.
    pub fn tasks(self) -> impl Iterator<Item = Task> + 'a {
        let lines = self.document.lines();
        let states = self.states;
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_heading(line))
            .filter_map(move |(index, _)| task_at(lines, index, states))
    }

    /// First task in document order with `id`.
    pub fn find(&self, id: &str) -> Result<Task> {
        self.tasks()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound { id: id.to_string() })
    }

    /// Range of the direct child of `task` titled `name`.
    pub fn section(&self, task: &Task, name: &str) -> Option<LineRange> {
        find_child_section(self.document.lines(), task.range, task.depth, name)
    }

    /// Trimmed body of the direct child of `task` titled `name`, empty when
    /// the section does not exist.
    pub fn section_text(&self, task: &Task, name: &str) -> String {
        self.section(task, name)
            .map(|range| section_body(self.document.lines(), range))
            .unwrap_or_default()
    }

    /// Trimmed body of the task's `Agent Context` section.
    pub fn agent_context(&self, task: &Task) -> String {
        self.section_text(task, AGENT_CONTEXT_SECTION)
    }
}

fn task_at(lines: &[String], index: usize, states: &StateSet) -> Option<Task> {
    let heading = parse_heading(&lines[index], states)?;
    let range = compute_range(lines, index);
    let properties = find_properties(lines, range);

    let id = properties
        .get(ID_PROPERTY)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())?
        .to_string();

    Some(Task {
        id,
        depth: heading.depth,
        heading: lines[index].clone(),
        title: heading.title,
        state: heading.state,
        properties,
        range,
    })
}

/// Every task in `document`, in document order.
pub fn extract_tasks(document: &Document, states: &StateSet) -> Vec<Task> {
    Outline::new(document, states).tasks().collect()
}

/// First task with `id`, or [`Error::TaskNotFound`].
pub fn find_task(document: &Document, id: &str, states: &StateSet) -> Result<Task> {
    Outline::new(document, states).find(id)
}
