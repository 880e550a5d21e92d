//! Answer source trait — the seam between dispatch and the upstream API.

use crate::BoxFuture;

/// One answer from the upstream API, scoped to a single request cycle.
#[derive(Debug, Clone)]
pub struct UpstreamAnswer {
    /// The answer body as returned by the model.
    pub text: String,
    /// Source references the upstream attached to the answer, when present.
    pub references: Option<Vec<String>>,
}

/// Errors from upstream calls.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("authentication failed (check API key): {0}")]
    Auth(String),

    #[error("upstream API error: {status} {status_text}: {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("response parse error: {0}")]
    Parse(String),

    #[error("upstream answer contained no message content")]
    EmptyAnswer,
}

/// Core trait for upstream answer sources.
///
/// Implementations must be `Send + Sync` for use behind `Arc<dyn _>`.
/// Uses `BoxFuture` for object safety.
pub trait AnswerSource: Send + Sync {
    /// Source display name (e.g. "Perplexity").
    fn name(&self) -> &str;

    /// Send one prompt upstream and await the answer.
    ///
    /// Exactly one outbound request per call; no retry, no streaming.
    fn ask(&self, prompt: &str) -> BoxFuture<'_, Result<UpstreamAnswer, UpstreamError>>;
}
