//! Filesystem layer for Org Workflow
//!
//! Provides the persistence guard around workflow documents: missing-file
//! tolerant reads, atomic whole-file replacement and a cross-process
//! advisory lock that serialises read-modify-write cycles.

pub mod error;
pub mod io;
pub mod lock;
pub mod path;

pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use lock::{LockGuard, LockStrategy, with_lock};
pub use path::{NormalizedPath, expand_home};
