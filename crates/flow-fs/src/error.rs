//! Error types for flow-fs

use std::path::PathBuf;
use std::time::Duration;

/// Result type for flow-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in flow-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out after {timeout:?} waiting for lock on {path}")]
    LockTimeout { path: PathBuf, timeout: Duration },

    #[error("Cannot expand '{path}': home directory could not be resolved")]
    HomeDirectoryUnresolved { path: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
