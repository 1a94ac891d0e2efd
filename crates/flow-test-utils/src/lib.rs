//! Shared test utilities for the Org Workflow workspace.
//!
//! Dev-dependency only. Provides [`TestWorkflow`], a temporary directory
//! holding a workflow document, and a few canned documents.
//!
//! # Modules
//!
//! - [`fixtures`]: sample workflow documents
//! - [`workflow`]: the [`TestWorkflow`] builder

pub mod fixtures;
pub mod workflow;

pub use workflow::TestWorkflow;
