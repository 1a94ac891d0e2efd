//! Outline document parsing and task mutation for Org Workflow.
//!
//! A workflow file is an org-style outline. Headings are lines of one or more
//! `*` markers followed by whitespace, optionally starting with a status
//! keyword. A heading becomes a task when the `:PROPERTIES:` block right
//! below it carries a non-empty `ID`:
//!
//! ```text
//! * IN-PROGRESS Wire up the exporter   :backend:
//! :PROPERTIES:
//! :ID: 42
//! :END:
//!
//! ** Agent Context
//! Read the exporter module first.
//!
//! ** Log
//!
//! - [2026-01-02T03:04:05.678Z] Started.
//! ```
//!
//! Everything here is pure text transformation. A [`Document`] keeps the
//! file's line-ending style and trailing-newline state so that an unmodified
//! parse serializes back to identical bytes; mutators return a new
//! [`Document`] instead of editing in place. Persistence lives in `flow-fs`.

pub mod document;
pub mod error;
pub mod heading;
pub mod mutate;
pub mod section;
pub mod state;
pub mod task;

pub use document::{Document, LineEnding};
pub use error::{Error, Result};
pub use heading::{Heading, heading_depth, is_heading, parse_heading};
pub use mutate::{append_task_log, sanitize_log_entry, set_task_state};
pub use section::{LineRange, Properties, compute_range, find_child_section, find_properties};
pub use state::{StateSet, TaskState};
pub use task::{Outline, Task, extract_tasks, find_task};
