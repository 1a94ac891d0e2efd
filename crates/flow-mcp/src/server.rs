//! MCP Server implementation
//!
//! The main server struct that coordinates MCP protocol handling with the
//! workflow operations.

use std::io::{BufRead, Write};

use flow_core::Workflow;
use serde_json::{Value, json};

use crate::handlers::handle_tool_call;
use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeParams, InitializeResult,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, ServerCapabilities,
    ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::tools::{ToolDefinition, ToolResult, get_tool_definitions};
use crate::{Error, Result};

/// MCP Server for one workflow file
///
/// Requests are handled one at a time, in arrival order. Each tool call runs
/// to completion, including any lock wait, before the next line is read.
///
/// # Example
///
/// ```ignore
/// use flow_core::{ConfigResolver, Workflow};
/// use flow_mcp::FlowMcpServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ConfigResolver::new().with_env().resolve()?;
///     let mut server = FlowMcpServer::new(Workflow::new(config));
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct FlowMcpServer {
    workflow: Workflow,

    /// Whether the server has been initialized
    initialized: bool,

    /// Available MCP tools
    tools: Vec<ToolDefinition>,
}

impl FlowMcpServer {
    pub fn new(workflow: Workflow) -> Self {
        Self {
            workflow,
            initialized: false,
            tools: Vec::new(),
        }
    }

    /// Load tool definitions and mark the server ready.
    pub async fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            file = %self.workflow.config().workflow_file,
            states = %self.workflow.config().states,
            "Initializing MCP server"
        );

        self.tools = get_tool_definitions();
        self.initialized = true;
        Ok(())
    }

    /// Serve JSON-RPC messages from stdin until it closes, one per line.
    pub async fn run(&mut self) -> Result<()> {
        self.initialize().await?;

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        tracing::info!("MCP server ready, listening on stdio");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let response = match self.handle_message(&line).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to handle message");
                    let error_response =
                        JsonRpcResponse::error(None, INTERNAL_ERROR, format!("Internal error: {}", e));
                    serde_json::to_string(&error_response)?
                }
            };

            // Notifications get no response
            if !response.is_empty() {
                writeln!(stdout, "{}", response)?;
                stdout.flush()?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message.
    ///
    /// Returns the serialized JSON-RPC response, or an empty string for
    /// notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                let response = JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e));
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        if request.jsonrpc != "2.0" {
            let response = JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            );
            return serde_json::to_string(&response).map_err(Error::from);
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params)?,
            "initialized" | "notifications/initialized" => return Ok(String::new()),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    fn handle_initialize(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: InitializeParams = match params {
            Value::Null => InitializeParams::default(),
            params => match serde_json::from_value(params) {
                Ok(params) => params,
                Err(e) => {
                    return Ok(JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        format!("Invalid initialize params: {}", e),
                    ));
                }
            },
        };

        let protocol_version = params.negotiated_version();
        tracing::info!(
            client = params.client_info.as_ref().map(|c| c.name.as_str()),
            client_version = params.client_info.as_ref().and_then(|c| c.version.as_deref()),
            requested = params.protocol_version.as_deref(),
            protocol_version,
            "Client connected"
        );

        let result = InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "flow-mcp",
                version: env!("CARGO_PKG_VERSION"),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<Value> = get_tool_definitions()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Tool failures are reported inside a successful response with
    /// `isError: true`; only malformed params are protocol errors.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                ));
            }
        };

        let tool_result =
            match handle_tool_call(&self.workflow, &tool_params.name, tool_params.arguments).await {
                Ok(text) => ToolResult::text(text),
                Err(e) => {
                    tracing::warn!(tool = %tool_params.name, error = %e, "Tool call failed");
                    ToolResult::error(e.to_string())
                }
            };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(tool_result)?))
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Check if the server is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get available tools
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }
}
