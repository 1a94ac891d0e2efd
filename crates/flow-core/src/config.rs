//! Workflow configuration resolution
//!
//! Configuration is resolved once, at process start, into a [`WorkflowConfig`]
//! that is then passed explicitly to every operation. The workflow file is
//! chosen from the first source that applies:
//!
//! 1. An explicit path (`--file` or `FLOW_WORKFLOW_FILE`), `~` expanded
//! 2. `<project root>/workflow.org`, if that file exists
//! 3. `~/.flow/workflow.org`, whether or not it exists yet

use std::path::{Path, PathBuf};
use std::time::Duration;

use flow_fs::{NormalizedPath, RobustnessConfig, expand_home};
use flow_outline::StateSet;

use crate::{Error, Result};

/// Environment variable naming the workflow file.
pub const WORKFLOW_FILE_ENV: &str = "FLOW_WORKFLOW_FILE";
/// Environment variable holding a comma-separated state set.
pub const TASK_STATES_ENV: &str = "FLOW_TASK_STATES";
/// Environment variable holding the lock timeout in milliseconds.
pub const LOCK_TIMEOUT_ENV: &str = "FLOW_LOCK_TIMEOUT_MS";

/// File name looked up in the project root.
pub const PROJECT_WORKFLOW_FILE: &str = "workflow.org";
/// Fallback workflow file in the user's home directory.
pub const HOME_WORKFLOW_FILE: &str = "~/.flow/workflow.org";

/// Everything an operation needs to know about its workflow file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub workflow_file: NormalizedPath,
    pub states: StateSet,
    pub robustness: RobustnessConfig,
}

impl WorkflowConfig {
    /// Config for `workflow_file` with the default state set and robustness.
    pub fn new(workflow_file: impl Into<NormalizedPath>) -> Self {
        Self {
            workflow_file: workflow_file.into(),
            states: StateSet::default(),
            robustness: RobustnessConfig::default(),
        }
    }

    pub fn with_states(mut self, states: StateSet) -> Self {
        self.states = states;
        self
    }

    pub fn with_robustness(mut self, robustness: RobustnessConfig) -> Self {
        self.robustness = robustness;
        self
    }
}

#[derive(Debug, Clone, Default)]
enum HomeSource {
    #[default]
    System,
    Fixed(Option<PathBuf>),
}

/// Builds a [`WorkflowConfig`] from raw values.
///
/// Values set explicitly win over values read by [`with_env`](Self::with_env).
/// Blank values count as unset.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    workflow_file: Option<String>,
    states: Option<String>,
    lock_timeout_ms: Option<String>,
    project_root: Option<PathBuf>,
    home: HomeSource,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workflow_file(mut self, value: Option<String>) -> Self {
        self.workflow_file = value;
        self
    }

    /// Comma-separated status keywords.
    pub fn states(mut self, value: Option<String>) -> Self {
        self.states = value;
        self
    }

    pub fn lock_timeout_ms(mut self, value: Option<String>) -> Self {
        self.lock_timeout_ms = value;
        self
    }

    pub fn project_root(mut self, root: Option<PathBuf>) -> Self {
        self.project_root = root;
        self
    }

    /// Use `home` instead of the platform home directory. `None` simulates a
    /// system where the home directory cannot be determined.
    ///
    /// This is primarily useful for testing, so the real user environment is
    /// never consulted.
    pub fn with_home_dir(mut self, home: Option<PathBuf>) -> Self {
        self.home = HomeSource::Fixed(home);
        self
    }

    /// Fill every unset value from the process environment. The project root
    /// defaults to the current directory.
    pub fn with_env(mut self) -> Self {
        if self.workflow_file.is_none() {
            self.workflow_file = std::env::var(WORKFLOW_FILE_ENV).ok();
        }
        if self.states.is_none() {
            self.states = std::env::var(TASK_STATES_ENV).ok();
        }
        if self.lock_timeout_ms.is_none() {
            self.lock_timeout_ms = std::env::var(LOCK_TIMEOUT_ENV).ok();
        }
        if self.project_root.is_none() {
            self.project_root = std::env::current_dir().ok();
        }
        self
    }

    fn home_dir(&self) -> Option<PathBuf> {
        match &self.home {
            HomeSource::System => dirs::home_dir(),
            HomeSource::Fixed(home) => home.clone(),
        }
    }

    pub fn resolve(self) -> Result<WorkflowConfig> {
        let workflow_file = self.resolve_workflow_file()?;

        let states = match non_blank(&self.states) {
            Some(raw) => parse_states(raw)?,
            None => StateSet::default(),
        };

        let mut robustness = RobustnessConfig::default();
        if let Some(raw) = non_blank(&self.lock_timeout_ms) {
            robustness.lock_timeout = parse_timeout(raw)?;
        }

        tracing::debug!(
            file = %workflow_file,
            states = %states,
            lock_timeout = ?robustness.lock_timeout,
            "Resolved workflow configuration"
        );

        Ok(WorkflowConfig {
            workflow_file,
            states,
            robustness,
        })
    }

    fn resolve_workflow_file(&self) -> Result<NormalizedPath> {
        let home = self.home_dir();

        if let Some(raw) = non_blank(&self.workflow_file) {
            return Ok(expand_home(raw, home.as_deref())?);
        }

        if let Some(root) = &self.project_root {
            let local = project_file(root);
            if local.is_file() {
                return Ok(local);
            }
        }

        Ok(expand_home(HOME_WORKFLOW_FILE, home.as_deref())?)
    }
}

fn project_file(root: &Path) -> NormalizedPath {
    NormalizedPath::new(root).join(PROJECT_WORKFLOW_FILE)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_states(raw: &str) -> Result<StateSet> {
    let states = StateSet::new(raw.split(','));
    if states.is_empty() {
        return Err(Error::InvalidConfig {
            key: TASK_STATES_ENV.to_string(),
            message: "no status keywords given".to_string(),
        });
    }
    if let Some(bad) = states.iter().find(|s| s.contains(char::is_whitespace)) {
        return Err(Error::InvalidConfig {
            key: TASK_STATES_ENV.to_string(),
            message: format!("status keyword '{bad}' contains whitespace"),
        });
    }
    Ok(states)
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| Error::InvalidConfig {
            key: LOCK_TIMEOUT_ENV.to_string(),
            message: format!("'{raw}' is not a number of milliseconds: {e}"),
        })
}
