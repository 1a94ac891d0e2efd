//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during MCP server operations
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the workflow operations, shown to the agent as is
    #[error(transparent)]
    Core(#[from] flow_core::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on the protocol stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown tool requested
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Invalid argument provided
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A blocking task panicked or was cancelled
    #[error("internal error: {0}")]
    Internal(String),
}
