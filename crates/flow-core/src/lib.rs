//! Core operations for Org Workflow
//!
//! This crate ties the pure outline model to the persistence guard:
//!
//! - **Configuration**: [`WorkflowConfig`] resolved once from flags,
//!   environment and defaults by [`ConfigResolver`]
//! - **Operations**: [`Workflow`] lists tasks, exports a task's context and
//!   performs locked, atomic state changes and log appends
//!
//! # Architecture
//!
//! ```text
//!          flow-mcp
//!              |
//!          flow-core
//!              |
//!     +--------+--------+
//!     |                 |
//!  flow-fs        flow-outline
//! ```
//!
//! # Example
//!
//! ```no_run
//! use flow_core::{ConfigResolver, ListQuery, Workflow};
//!
//! fn example() -> flow_core::Result<()> {
//!     let config = ConfigResolver::new().with_env().resolve()?;
//!     let workflow = Workflow::new(config);
//!     for task in workflow.list_tasks(&ListQuery::default())? {
//!         println!("{} {}", task.id, task.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod workflow;

pub use config::{ConfigResolver, WorkflowConfig};
pub use error::{Error, Result};
pub use flow_outline::{Properties, StateSet};
pub use workflow::{ListQuery, MAX_LIST_LIMIT, TaskContext, TaskSummary, Workflow};
