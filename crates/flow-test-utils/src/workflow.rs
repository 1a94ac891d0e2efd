//! [`TestWorkflow`] builder for workflow test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Default name of the workflow document inside the temporary directory.
pub const WORKFLOW_FILE: &str = "workflow.org";

/// A temporary directory holding a workflow document, with helpers for setup
/// and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use flow_test_utils::{TestWorkflow, fixtures};
///
/// let workflow = TestWorkflow::with_content(fixtures::BOARD);
/// workflow.assert_contains("* DONE Release 1.4");
/// ```
pub struct TestWorkflow {
    temp_dir: TempDir,
    file: PathBuf,
}

impl Default for TestWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkflow {
    /// Create an empty temporary directory. The workflow file does not exist
    /// until [`write`](Self::write) is called.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join(WORKFLOW_FILE);
        Self { temp_dir, file }
    }

    /// Create a directory whose workflow file holds `content`.
    pub fn with_content(content: &str) -> Self {
        let workflow = Self::new();
        workflow.write(content);
        workflow
    }

    /// Root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the workflow file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Overwrite the workflow file.
    pub fn write(&self, content: &str) {
        fs::write(&self.file, content).unwrap();
    }

    /// Current contents of the workflow file.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self) -> String {
        fs::read_to_string(&self.file)
            .unwrap_or_else(|_| panic!("Could not read workflow file: {}", self.file.display()))
    }

    /// Entries of the directory other than the workflow file itself, sorted.
    /// Useful for asserting that no temporary or lock files are left behind.
    pub fn stray_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name != WORKFLOW_FILE)
            .collect();
        names.sort();
        names
    }

    /// Assert that the workflow file contains `content`.
    ///
    /// # Panics
    /// Panics with the file contents if `content` is missing.
    pub fn assert_contains(&self, content: &str) {
        let actual = self.read();
        assert!(
            actual.contains(content),
            "Workflow file does not contain expected content.\nExpected: {}\nActual: {}",
            content,
            actual
        );
    }

    /// Assert that the workflow file does **not** exist.
    pub fn assert_missing(&self) {
        assert!(
            !self.file.exists(),
            "Expected workflow file NOT to exist: {}",
            self.file.display()
        );
    }
}
