//! Cross-process advisory locking for workflow files
//!
//! Every mutation of a workflow file runs inside [`with_lock`], which holds an
//! exclusive lock on a sibling of the file for the whole read-modify-write
//! cycle. The lock is advisory: writers that bypass it are not stopped.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result, RobustnessConfig};

/// How the lock adjacent to a workflow file is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockStrategy {
    /// OS advisory lock on a persistent `<file>.lock`. Released by the kernel
    /// if the holder dies, so a crash cannot leave the file locked.
    #[default]
    Native,
    /// Sentinel `<file>.marker` created with create-new semantics and deleted
    /// on release. A crash while held leaves a stale marker behind that must be
    /// removed by hand.
    Marker,
}

impl LockStrategy {
    /// Suffix of the lock file. The strategies use distinct files so that a
    /// persistent native lock file never reads as a held marker.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Native => ".lock",
            Self::Marker => ".marker",
        }
    }
}

/// Held lock. Dropping it releases the lock.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
    file: Option<File>,
    strategy: LockStrategy,
}

impl LockGuard {
    /// Path of the lock file backing this guard.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };
        match self.strategy {
            LockStrategy::Native => {
                if let Err(e) = FileExt::unlock(&file) {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to unlock");
                }
            }
            LockStrategy::Marker => {
                drop(file);
                if let Err(e) = fs::remove_file(&self.path) {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove lock marker");
                }
            }
        }
        tracing::debug!(path = %self.path.display(), "Lock released");
    }
}

/// Path of the lock file guarding `path` under `strategy`.
pub fn lock_path(path: &NormalizedPath, strategy: LockStrategy) -> PathBuf {
    path.with_suffix(strategy.suffix()).to_native()
}

/// Acquire the lock for `path`, retrying on a fixed interval until
/// `config.lock_timeout` has elapsed.
pub fn acquire(path: &NormalizedPath, config: &RobustnessConfig) -> Result<LockGuard> {
    let lock_path = lock_path(path, config.lock_strategy);

    if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Multiplier 1 and no jitter turn the exponential policy into a constant one
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(config.retry_interval)
        .with_max_interval(config.retry_interval)
        .with_multiplier(1.0)
        .with_randomization_factor(0.0)
        .with_max_elapsed_time(Some(config.lock_timeout))
        .build();

    let guard = backoff::retry_notify(
        policy,
        || try_acquire(&lock_path, config.lock_strategy),
        |_: Error, wait: Duration| {
            tracing::debug!(path = %lock_path.display(), ?wait, "Lock busy, retrying");
        },
    )
    .map_err(|e| match e {
        backoff::Error::Permanent(err) => err,
        backoff::Error::Transient { .. } => Error::LockTimeout {
            path: lock_path.clone(),
            timeout: config.lock_timeout,
        },
    })?;

    tracing::debug!(path = %lock_path.display(), strategy = ?config.lock_strategy, "Lock acquired");
    Ok(guard)
}

fn try_acquire(
    lock_path: &Path,
    strategy: LockStrategy,
) -> std::result::Result<LockGuard, backoff::Error<Error>> {
    match strategy {
        LockStrategy::Native => {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(lock_path)
                .map_err(|e| backoff::Error::permanent(Error::io(lock_path, e)))?;

            match file.try_lock_exclusive() {
                Ok(()) => Ok(LockGuard {
                    path: lock_path.to_path_buf(),
                    file: Some(file),
                    strategy,
                }),
                Err(e) if is_contended(&e) => {
                    Err(backoff::Error::transient(Error::io(lock_path, e)))
                }
                Err(e) => Err(backoff::Error::permanent(Error::io(lock_path, e))),
            }
        }
        LockStrategy::Marker => {
            match OpenOptions::new().write(true).create_new(true).open(lock_path) {
                Ok(mut file) => {
                    // Holder pid only helps a human clean up a stale marker
                    let _ = writeln!(file, "{}", std::process::id());
                    Ok(LockGuard {
                        path: lock_path.to_path_buf(),
                        file: Some(file),
                        strategy,
                    })
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    Err(backoff::Error::transient(Error::io(lock_path, e)))
                }
                Err(e) => Err(backoff::Error::permanent(Error::io(lock_path, e))),
            }
        }
    }
}

fn is_contended(e: &std::io::Error) -> bool {
    e.kind() == ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Run `f` while holding the lock for `path`.
///
/// The lock is released when `f` returns, whether it succeeded or failed.
pub fn with_lock<T, E, F>(path: &NormalizedPath, config: &RobustnessConfig, f: F) -> std::result::Result<T, E>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: From<Error>,
{
    let _guard = acquire(path, config)?;
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config(strategy: LockStrategy) -> RobustnessConfig {
        RobustnessConfig {
            lock_timeout: Duration::from_millis(200),
            retry_interval: Duration::from_millis(10),
            enable_fsync: false,
            lock_strategy: strategy,
        }
    }

    #[test]
    fn lock_path_is_sibling_with_strategy_suffix() {
        let path = NormalizedPath::new("/work/tasks.org");
        assert_eq!(
            lock_path(&path, LockStrategy::Native),
            PathBuf::from("/work/tasks.org.lock")
        );
        assert_eq!(
            lock_path(&path, LockStrategy::Marker),
            PathBuf::from("/work/tasks.org.marker")
        );
    }

    #[test]
    fn marker_is_removed_on_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("tasks.org"));
        let config = fast_config(LockStrategy::Marker);

        let guard = acquire(&path, &config).unwrap();
        assert!(guard.path().exists());
        drop(guard);
        assert!(!lock_path(&path, LockStrategy::Marker).exists());
    }

    #[test]
    fn native_lock_file_does_not_block_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("tasks.org"));

        drop(acquire(&path, &fast_config(LockStrategy::Native)).unwrap());
        assert!(lock_path(&path, LockStrategy::Native).exists());

        let guard = acquire(&path, &fast_config(LockStrategy::Marker)).unwrap();
        assert_eq!(guard.path(), lock_path(&path, LockStrategy::Marker).as_path());
    }

    #[test]
    fn marker_held_causes_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("tasks.org"));
        let config = fast_config(LockStrategy::Marker);

        let _held = acquire(&path, &config).unwrap();
        let err = acquire(&path, &config).unwrap_err();
        assert!(matches!(err, Error::LockTimeout { .. }));
    }
}
