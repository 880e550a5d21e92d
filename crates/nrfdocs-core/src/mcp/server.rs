//! Request dispatch and the tool boundary.
//!
//! [`McpServer`] owns the answer source and handles one message at a time.
//! Protocol-shaped problems (unknown method or tool, bad params) come back
//! as JSON-RPC errors; anything that goes wrong inside the search chain is
//! caught at the tool boundary and reported as an error-flagged result so
//! the server keeps serving.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::enhance::{QueryContext, ResultType, enhance_query};
use crate::format::format_response;
use crate::upstream::AnswerSource;

use super::protocol::*;

/// Name of the single tool this server advertises.
pub const TOOL_NAME: &str = "search_nordic_docs";

const SERVER_NAME: &str = "nrfdocs";

/// The MCP server: one tool, no state beyond the upstream handle.
pub struct McpServer {
    source: Arc<dyn AnswerSource>,
}

/// Arguments of the `search_nordic_docs` tool.
#[derive(Debug, Deserialize)]
struct SearchDocsArgs {
    query: String,
    #[serde(default)]
    sdk_version: Option<String>,
    #[serde(default)]
    result_type: Option<ResultType>,
}

impl McpServer {
    /// Create a server over the given answer source.
    pub fn new(source: Arc<dyn AnswerSource>) -> Self {
        Self { source }
    }

    /// Handle one raw message line.
    ///
    /// Returns the serialized response, or `None` for notifications.
    pub async fn handle_message(&self, line: &str) -> Option<String> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "discarding unparseable message");
                let resp =
                    JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e.to_string()));
                return serialize_response(resp);
            }
        };

        if request.is_notification() {
            debug!(method = %request.method, "notification received");
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        };
        serialize_response(response)
    }

    /// Route a request to its handler.
    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => to_result(initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => to_result(ListToolsResult {
                tools: vec![search_tool_descriptor()],
            }),
            "tools/call" => self.call_tool(params).await,
            other => Err(JsonRpcError::method_not_found(format!(
                "Unknown method: {other}"
            ))),
        }
    }

    /// Validate a `tools/call` request and run the search tool.
    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(json!({})))
            .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;

        if params.name != TOOL_NAME {
            return Err(JsonRpcError::method_not_found(format!(
                "Unknown tool: {}",
                params.name
            )));
        }

        let args: SearchDocsArgs = serde_json::from_value(params.arguments.unwrap_or(json!({})))
            .map_err(|e| JsonRpcError::invalid_params(format!("invalid arguments: {e}")))?;
        if args.query.is_empty() {
            return Err(JsonRpcError::invalid_params("Query parameter is required"));
        }

        to_result(self.search(args).await)
    }

    /// The enhance → ask → format chain, with the error boundary.
    async fn search(&self, args: SearchDocsArgs) -> CallToolResult {
        let result_type = args.result_type.unwrap_or_default();
        let context = QueryContext {
            sdk_version: args.sdk_version,
            result_type: args.result_type,
        };

        let enhanced = enhance_query(&args.query, &context);
        debug!(source = %self.source.name(), query = %args.query, "dispatching search");

        let answer = match self.source.ask(&enhanced).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "upstream call failed");
                return CallToolResult::error(format!("Error searching documentation: {e}"));
            }
        };

        let formatted = format_response(&answer.text, result_type);
        match serde_json::to_string_pretty(&formatted) {
            Ok(text) => CallToolResult::text(text),
            Err(e) => CallToolResult::error(format!("Error searching documentation: {e}")),
        }
    }
}

/// Serialize a response, downgrading an (unexpected) serialization failure
/// to an internal-error payload rather than dropping the reply.
fn serialize_response(response: JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(&response) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!(error = %e, "failed to serialize response");
            Some(
                r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"response serialization failed"}}"#
                    .to_string(),
            )
        }
    }
}

fn to_result<T: serde::Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal(e.to_string()))
}

fn initialize_result() -> InitializeResult {
    InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities::default(),
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}

/// Descriptor of the one advertised tool, schema included.
fn search_tool_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description:
            "Search Nordic Semiconductor documentation for API references and code examples"
                .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query or API function name",
                },
                "sdk_version": {
                    "type": "string",
                    "description": "Optional SDK version to target (e.g., \"nRF5 SDK v17.1.0\")",
                },
                "result_type": {
                    "type": "string",
                    "enum": ["api_reference", "code_example", "both"],
                    "description": "Type of results to return",
                    "default": "both",
                },
            },
            "required": ["query"],
        }),
    }
}
