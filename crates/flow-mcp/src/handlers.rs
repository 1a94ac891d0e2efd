//! MCP Tool Handlers
//!
//! This module implements the handlers for MCP tool calls, delegating to
//! flow-core for the actual operations. Every operation does blocking file
//! I/O and may wait on the workflow lock, so it runs on tokio's blocking pool.

use flow_core::{ListQuery, Workflow};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::render;
use crate::{Error, Result};

/// Handle a tool call by dispatching to the appropriate handler.
///
/// Returns the text shown to the agent.
pub async fn handle_tool_call(workflow: &Workflow, tool_name: &str, arguments: Value) -> Result<String> {
    match tool_name {
        "list_tasks" => handle_list_tasks(workflow, arguments).await,
        "get_task_context" => handle_get_task_context(workflow, arguments).await,
        "set_task_state" => handle_set_task_state(workflow, arguments).await,
        "append_task_log" => handle_append_task_log(workflow, arguments).await,
        _ => Err(Error::UnknownTool(tool_name.to_string())),
    }
}

/// Run `operation` against a clone of `workflow` on the blocking pool.
async fn run_blocking<T, F>(workflow: &Workflow, operation: F) -> Result<T>
where
    F: FnOnce(&Workflow) -> flow_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let workflow = workflow.clone();
    tokio::task::spawn_blocking(move || operation(&workflow))
        .await
        .map_err(|e| Error::Internal(e.to_string()))?
        .map_err(Error::from)
}

/// Absent or null arguments are treated as an empty object.
fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| Error::InvalidArgument(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct ListTasksArgs {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

/// Handle list_tasks - List tasks, optionally filtered
async fn handle_list_tasks(workflow: &Workflow, arguments: Value) -> Result<String> {
    let args: ListTasksArgs = parse_args(arguments)?;
    let query = ListQuery {
        state: args.state,
        query: args.query,
        limit: args.limit,
    };

    let tasks = run_blocking(workflow, move |w| w.list_tasks(&query)).await?;
    Ok(render::task_list(&tasks))
}

#[derive(Debug, Deserialize)]
struct TaskIdArgs {
    task_id: String,
}

/// Handle get_task_context - Export one task's agent-facing view
async fn handle_get_task_context(workflow: &Workflow, arguments: Value) -> Result<String> {
    let TaskIdArgs { task_id } = parse_args(arguments)?;

    let context = run_blocking(workflow, move |w| w.get_task_context(&task_id)).await?;
    Ok(render::task_context(&context))
}

#[derive(Debug, Deserialize)]
struct SetTaskStateArgs {
    task_id: String,
    state: String,
}

/// Handle set_task_state - Change a task's status keyword
async fn handle_set_task_state(workflow: &Workflow, arguments: Value) -> Result<String> {
    let args: SetTaskStateArgs = parse_args(arguments)?;
    let id = args.task_id.clone();

    let state = run_blocking(workflow, move |w| w.set_task_state(&args.task_id, &args.state)).await?;
    Ok(render::state_changed(&id, state.as_str()))
}

#[derive(Debug, Deserialize)]
struct AppendTaskLogArgs {
    task_id: String,
    entry: String,
}

/// Handle append_task_log - Append a timestamped log entry
async fn handle_append_task_log(workflow: &Workflow, arguments: Value) -> Result<String> {
    let args: AppendTaskLogArgs = parse_args(arguments)?;
    let id = args.task_id.clone();

    run_blocking(workflow, move |w| w.append_task_log(&args.task_id, &args.entry)).await?;
    Ok(render::log_appended(&id))
}
