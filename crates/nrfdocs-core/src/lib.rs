#![deny(unsafe_code)]

//! nrfdocs core — Nordic Semiconductor documentation search over MCP.
//!
//! The crate wires four pieces together: query enhancement, the upstream
//! answering client, response formatting, and the stdio protocol front-end.
//! One tool is exposed (`search_nordic_docs`); the actual "search" is
//! delegated entirely to the upstream completions API.

use std::future::Future;
use std::pin::Pin;

/// A type-erased, `Send`-safe, boxed future — the standard return type for async
/// trait methods that require dynamic dispatch (`dyn Trait`).
///
/// Native `async fn` in traits produces opaque return types that are **not**
/// object-safe. Traits consumed via `Box<dyn Trait>` or `&dyn Trait` must
/// return a concrete `Pin<Box<dyn Future>>` instead. This alias keeps those
/// signatures readable.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Query augmentation: version and result-type hints for free-text queries.
pub mod enhance;
/// Auxiliary heuristic extraction of API signatures and code examples.
pub mod extract;
/// Response shaping: raw answer text into the structured envelope.
pub mod format;
/// MCP front-end: JSON-RPC protocol types, dispatch, and stdio transport.
pub mod mcp;
/// Upstream answering API: trait seam and the Perplexity client.
pub mod upstream;

pub use enhance::{QueryContext, ResultType, enhance_query};
pub use format::{FormattedResponse, format_response};
pub use mcp::McpServer;
pub use upstream::{AnswerSource, PerplexityClient, UpstreamAnswer, UpstreamError};
