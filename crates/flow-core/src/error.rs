//! Error types for flow-core

/// Result type for flow-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in flow-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// List limit outside the accepted range
    #[error("Invalid limit {limit}: must be between 1 and {max}")]
    InvalidLimit { limit: usize, max: usize },

    /// A configuration value could not be used
    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    /// Filesystem error from flow-fs
    #[error(transparent)]
    Fs(#[from] flow_fs::Error),

    /// Outline error from flow-outline
    #[error(transparent)]
    Outline(#[from] flow_outline::Error),
}
