//! MCP Server for Org Workflow
//!
//! This crate exposes the task operations of `flow-core` via the Model
//! Context Protocol, so coding agents can read their assignments and report
//! progress without ever seeing the rest of the workflow file.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (agent) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ flow-mcp (MCP Server) ]
//!        | (Rust API, blocking pool)
//!        v
//! [ flow-core (Workflow) ]
//!        |
//!        +--> [ workflow.org + workflow.org.lock ]
//! ```
//!
//! # Tools
//!
//! - `list_tasks` - List tasks, optionally filtered
//! - `get_task_context` - Identity, metadata and agent context of one task
//! - `set_task_state` - Change a task's status keyword
//! - `append_task_log` - Append a timestamped entry to a task's log

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod render;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::FlowMcpServer;
pub use tools::{ToolContent, ToolDefinition, ToolResult, get_tool_definitions};
