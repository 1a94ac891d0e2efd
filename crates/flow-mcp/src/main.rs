//! Org Workflow MCP Server
//!
//! A Model Context Protocol server that lets coding agents list their tasks,
//! read a task's agent context, change its state and append to its log.
//!
//! # Usage
//!
//! ```bash
//! flow-mcp [--file <path>] [--states <A,B,...>] [--lock-timeout-ms <ms>] [--root <path>]
//! ```
//!
//! # Environment Variables
//!
//! - `FLOW_WORKFLOW_FILE`: workflow file, `~/` expanded
//! - `FLOW_TASK_STATES`: comma-separated status keywords
//! - `FLOW_LOCK_TIMEOUT_MS`: lock acquisition timeout
//! - `RUST_LOG`: Control log verbosity (default: `flow_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;

use clap::Parser;
use flow_core::config::{LOCK_TIMEOUT_ENV, TASK_STATES_ENV, WORKFLOW_FILE_ENV};
use flow_core::{ConfigResolver, Workflow};
use flow_mcp::FlowMcpServer;

/// MCP server for Org Workflow
#[derive(Parser)]
#[command(name = "flow-mcp")]
#[command(about = "MCP server for Org Workflow task files")]
#[command(version)]
struct Args {
    /// Workflow file to serve
    #[arg(short, long, env = WORKFLOW_FILE_ENV)]
    file: Option<String>,

    /// Comma-separated status keywords
    #[arg(short, long, env = TASK_STATES_ENV)]
    states: Option<String>,

    /// Lock acquisition timeout in milliseconds
    #[arg(long, env = LOCK_TIMEOUT_ENV)]
    lock_timeout_ms: Option<String>,

    /// Project root searched for workflow.org
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flow_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ConfigResolver::new()
        .workflow_file(args.file)
        .states(args.states)
        .lock_timeout_ms(args.lock_timeout_ms)
        .project_root(Some(args.root))
        .resolve()?;

    tracing::info!(file = %config.workflow_file, "Starting flow-mcp server");

    let mut server = FlowMcpServer::new(Workflow::new(config));
    server.run().await?;

    Ok(())
}
