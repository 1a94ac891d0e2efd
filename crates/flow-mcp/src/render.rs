//! Plain-text rendering of tool results
//!
//! Agents read these strings directly, so the shapes here are the tool
//! output contract.

use std::fmt::Write;

use flow_core::{TaskContext, TaskSummary};

/// Rendered when a listing matches nothing.
pub const NO_TASKS: &str = "No tasks found.";

// Placeholders for an absent state and an empty agent context
const NO_STATE: &str = "-";
const NO_CONTEXT: &str = "(none)";

/// One `<id>\t<state>\t<title>` line per task.
pub fn task_list(tasks: &[TaskSummary]) -> String {
    if tasks.is_empty() {
        return NO_TASKS.to_string();
    }
    tasks
        .iter()
        .map(|task| {
            format!(
                "{}\t{}\t{}",
                task.id,
                task.state.as_deref().unwrap_or(NO_STATE),
                task.title
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn task_context(context: &TaskContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", context.id);
    let _ = writeln!(out, "State: {}", context.state.as_deref().unwrap_or(NO_STATE));
    let _ = writeln!(out, "Title: {}", context.title);
    let _ = writeln!(out, "Properties:");
    for (key, value) in &context.properties {
        let _ = writeln!(out, "  {key}: {value}");
    }
    let _ = writeln!(out, "Agent Context:");
    if context.agent_context.is_empty() {
        out.push_str(NO_CONTEXT);
    } else {
        out.push_str(&context.agent_context);
    }
    out
}

pub fn state_changed(id: &str, state: &str) -> String {
    format!("Task {id} state set to {state}.")
}

pub fn log_appended(id: &str) -> String {
    format!("Appended log entry to task {id}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::Properties;
    use pretty_assertions::assert_eq;

    fn summary(id: &str, state: Option<&str>, title: &str) -> TaskSummary {
        TaskSummary {
            id: id.to_string(),
            state: state.map(str::to_string),
            title: title.to_string(),
        }
    }

    #[test]
    fn empty_list_is_distinct() {
        assert_eq!(task_list(&[]), "No tasks found.");
    }

    #[test]
    fn list_uses_tabs_and_dash_for_missing_state() {
        let tasks = [
            summary("1", Some("TODO"), "Write docs :docs:"),
            summary("2", None, "Untracked"),
        ];
        assert_eq!(task_list(&tasks), "1\tTODO\tWrite docs :docs:\n2\t-\tUntracked");
    }

    #[test]
    fn context_lists_properties_in_order() {
        let mut properties = Properties::new();
        properties.insert("ID".into(), "7".into());
        properties.insert("OWNER".into(), "ada".into());
        let context = TaskContext {
            id: "7".into(),
            state: Some("IN-PROGRESS".into()),
            title: "Port exporter".into(),
            properties,
            agent_context: "Start in export.rs".into(),
        };

        assert_eq!(
            task_context(&context),
            "ID: 7\nState: IN-PROGRESS\nTitle: Port exporter\nProperties:\n  ID: 7\n  OWNER: ada\nAgent Context:\nStart in export.rs"
        );
    }

    #[test]
    fn empty_context_renders_none() {
        let context = TaskContext {
            id: "7".into(),
            state: None,
            title: "T".into(),
            properties: Properties::new(),
            agent_context: String::new(),
        };
        assert!(task_context(&context).ends_with("State: -\nTitle: T\nProperties:\nAgent Context:\n(none)"));
    }

    #[test]
    fn confirmations() {
        assert_eq!(state_changed("7", "DONE"), "Task 7 state set to DONE.");
        assert_eq!(log_appended("7"), "Appended log entry to task 7.");
    }
}
