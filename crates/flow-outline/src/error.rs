//! Error types for flow-outline

/// Result type for flow-outline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying or mutating an outline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Task not found: {id}")]
    TaskNotFound { id: String },

    #[error("Invalid state '{state}'. Allowed states: {}", .allowed.join(", "))]
    InvalidState { state: String, allowed: Vec<String> },

    /// `line` is 1-based
    #[error("Malformed heading at line {line}: {text}")]
    MalformedHeading { line: usize, text: String },

    #[error("Log entry for task {id} is empty after sanitizing")]
    EmptyLogEntry { id: String },
}
