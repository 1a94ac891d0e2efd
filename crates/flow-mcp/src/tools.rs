//! MCP tool definitions
//!
//! The four tools are the only way an agent touches the workflow file.
//! Everything outside a task's `Agent Context` stays invisible to it.

use serde::{Deserialize, Serialize};
use serde_json::json;

use flow_core::MAX_LIST_LIMIT;

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "list_tasks".to_string(),
            description: "List tasks with their ID, state and title".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "state": {
                        "type": "string",
                        "description": "Only tasks in this state"
                    },
                    "query": {
                        "type": "string",
                        "description": "Case-insensitive substring of the task title"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": MAX_LIST_LIMIT,
                        "description": "Maximum number of tasks to return"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "get_task_context".to_string(),
            description: "Get a task's state, title, properties and agent context".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "task_id": {
                        "type": "string",
                        "description": "Value of the task's ID property"
                    }
                },
                "required": ["task_id"]
            }),
        },
        ToolDefinition {
            name: "set_task_state".to_string(),
            description: "Change a task's state keyword".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "task_id": {
                        "type": "string",
                        "description": "Value of the task's ID property"
                    },
                    "state": {
                        "type": "string",
                        "description": "New state, one of the configured keywords"
                    }
                },
                "required": ["task_id", "state"]
            }),
        },
        ToolDefinition {
            name: "append_task_log".to_string(),
            description: "Append a timestamped entry to a task's log. Fails if the entry is empty \
                          once heading markers and blank lines are stripped"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "task_id": {
                        "type": "string",
                        "description": "Value of the task's ID property"
                    },
                    "entry": {
                        "type": "string",
                        "description": "Log text; line breaks are flattened. Must contain non-blank text"
                    }
                },
                "required": ["task_id", "entry"]
            }),
        },
    ]
}
