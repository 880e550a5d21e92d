//! MCP front-end.
//!
//! Implements the tool-invocation side of the Model Context Protocol over
//! stdio: JSON-RPC 2.0 messages, one per line, protocol revision 2024-11-05.
//! Exactly one tool is advertised (`search_nordic_docs`).
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌──────────────────────────┐
//! │  Transport  │───▶│   Server    │───▶│ enhance → ask → format   │
//! │   (stdio)   │    │ (dispatch)  │    │      (tool handler)      │
//! └─────────────┘    └─────────────┘    └──────────────────────────┘
//! ```

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{
    CallToolResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION,
    ToolContent,
};
pub use server::{McpServer, TOOL_NAME};
pub use transport::{ServeError, serve_stdio};
