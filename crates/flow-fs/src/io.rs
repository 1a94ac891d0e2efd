//! Atomic I/O operations for workflow documents

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::lock::LockStrategy;
use crate::{Error, NormalizedPath, Result};

/// Tuning knobs for locking and durability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// Upper bound on how long lock acquisition keeps retrying.
    pub lock_timeout: Duration,
    /// Fixed wait between lock acquisition attempts.
    pub retry_interval: Duration,
    /// Flush the temporary file to disk before renaming it into place.
    pub enable_fsync: bool,
    /// How the advisory lock is taken.
    pub lock_strategy: LockStrategy,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            retry_interval: Duration::from_millis(50),
            enable_fsync: true,
            lock_strategy: LockStrategy::default(),
        }
    }
}

/// Distinguishes temp files created by concurrent writers in one process.
static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn temp_path_for(native_path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed)
    );
    native_path.with_file_name(temp_name)
}

/// Read text content from a file.
///
/// A file that does not exist reads as an empty document. Every other
/// failure (permissions, invalid UTF-8, a directory in the way) is an error.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    match fs::read_to_string(&native_path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path, "Workflow file missing, treating as empty");
            Ok(String::new())
        }
        Err(e) => Err(Error::io(native_path, e)),
    }
}

/// Write content atomically to a file.
///
/// Writes to a hidden temporary sibling and renames it over the target, so
/// readers observe either the old or the new content. When the platform
/// refuses to rename over an existing target the content is written to the
/// target directly; any other rename failure is returned. The temporary file
/// never outlives this call.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_path_for(&native_path);
    let result = write_temp(&temp_path, content, config.enable_fsync)
        .and_then(|()| replace(&temp_path, &native_path, content));

    if temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            tracing::warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file");
        }
    }

    result
}

fn write_temp(temp_path: &Path, content: &[u8], fsync: bool) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if fsync {
        temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    }

    Ok(())
}

fn replace(temp_path: &Path, native_path: &Path, content: &[u8]) -> Result<()> {
    match fs::rename(temp_path, native_path) {
        Ok(()) => Ok(()),
        Err(e) if native_path.is_file() && rename_cannot_overwrite(&e) => {
            tracing::warn!(
                path = %native_path.display(),
                error = %e,
                "Atomic rename refused, writing in place"
            );
            fs::write(native_path, content).map_err(|e| Error::io(native_path, e))
        }
        Err(e) => Err(Error::io(native_path, e)),
    }
}

/// Errors a platform reports when it will not rename over an existing file,
/// typically Windows while another process has the target open.
fn rename_cannot_overwrite(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::PermissionDenied | ErrorKind::ResourceBusy | ErrorKind::Unsupported
    )
}
