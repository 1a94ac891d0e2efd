//! Task operations over a workflow file
//!
//! Reads never lock: they parse whatever is on disk. Mutations run their
//! whole read-modify-write cycle inside the file's advisory lock and replace
//! the file atomically, so a failed mutation leaves the file untouched.

use chrono::{DateTime, Utc};
use flow_fs::{io, with_lock};
use flow_outline::{Document, Outline, Properties, Task, TaskState};

use crate::{Error, Result, WorkflowConfig};

/// Largest page `list_tasks` will return.
pub const MAX_LIST_LIMIT: usize = 500;

/// Filters for [`Workflow::list_tasks`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Only tasks in this state. Must be a member of the configured set.
    pub state: Option<String>,
    /// Case-insensitive substring of the title.
    pub query: Option<String>,
    /// At most this many tasks, `1..=MAX_LIST_LIMIT`. `None` returns all.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub id: String,
    pub state: Option<String>,
    pub title: String,
}

impl From<Task> for TaskSummary {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            state: task.state.map(|s| s.as_str().to_string()),
            title: task.title,
        }
    }
}

/// What an agent is allowed to see of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContext {
    pub id: String,
    pub state: Option<String>,
    pub title: String,
    pub properties: Properties,
    /// Trimmed body of the `Agent Context` subsection, empty when absent.
    pub agent_context: String,
}

/// The four task operations bound to one workflow file.
#[derive(Debug, Clone)]
pub struct Workflow {
    config: WorkflowConfig,
}

impl Workflow {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    fn load(&self) -> Result<Document> {
        let text = io::read_text(&self.config.workflow_file)?;
        Ok(Document::parse(&text))
    }

    /// Tasks in document order, filtered by `query`.
    pub fn list_tasks(&self, query: &ListQuery) -> Result<Vec<TaskSummary>> {
        if let Some(limit) = query
            .limit
            .filter(|limit| !(1..=MAX_LIST_LIMIT).contains(limit))
        {
            return Err(Error::InvalidLimit {
                limit,
                max: MAX_LIST_LIMIT,
            });
        }
        let state = query
            .state
            .as_deref()
            .map(|s| self.config.states.parse(s))
            .transpose()?;
        let needle = query
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let document = self.load()?;
        let tasks: Vec<TaskSummary> = Outline::new(&document, &self.config.states)
            .tasks()
            .filter(|task| state.is_none() || task.state == state)
            .filter(|task| {
                needle
                    .as_ref()
                    .is_none_or(|n| task.title.to_lowercase().contains(n.as_str()))
            })
            .take(query.limit.unwrap_or(usize::MAX))
            .map(TaskSummary::from)
            .collect();

        tracing::debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Identity, metadata and agent context of task `id`.
    pub fn get_task_context(&self, id: &str) -> Result<TaskContext> {
        let document = self.load()?;
        let outline = Outline::new(&document, &self.config.states);
        let task = outline.find(id)?;
        let agent_context = outline.agent_context(&task);

        Ok(TaskContext {
            id: task.id,
            state: task.state.map(|s| s.as_str().to_string()),
            title: task.title,
            properties: task.properties,
            agent_context,
        })
    }

    /// Set the status keyword of task `id` and persist the change.
    pub fn set_task_state(&self, id: &str, state: &str) -> Result<TaskState> {
        let new_state = self.config.states.parse(state)?;
        self.commit("set_task_state", id, |document| {
            flow_outline::set_task_state(document, id, new_state.as_str(), &self.config.states)
        })?;
        Ok(new_state)
    }

    /// Append `entry` to the task's log, stamped with the current time.
    pub fn append_task_log(&self, id: &str, entry: &str) -> Result<()> {
        self.append_task_log_at(id, entry, Utc::now())
    }

    /// Append `entry` to the task's log with an explicit timestamp.
    pub fn append_task_log_at(&self, id: &str, entry: &str, timestamp: DateTime<Utc>) -> Result<()> {
        self.commit("append_task_log", id, |document| {
            flow_outline::append_task_log(document, id, entry, timestamp, &self.config.states)
        })
    }

    /// Locked read-transform-write of the workflow file.
    fn commit<F>(&self, operation: &str, id: &str, transform: F) -> Result<()>
    where
        F: FnOnce(&Document) -> flow_outline::Result<Document>,
    {
        let path = &self.config.workflow_file;
        let robustness = self.config.robustness;

        with_lock(path, &robustness, || {
            let document = self.load()?;
            let updated = transform(&document)?;
            io::write_atomic(path, updated.to_text().as_bytes(), robustness)?;
            Ok::<_, Error>(())
        })?;

        tracing::info!(operation, id, file = %path, "Committed workflow change");
        Ok(())
    }
}
