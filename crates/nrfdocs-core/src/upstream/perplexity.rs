//! Perplexity chat-completions client.
//!
//! Implements [`AnswerSource`] against the Perplexity API. The request is a
//! fixed two-turn chat: one system instruction scoping the assistant to the
//! Nordic documentation domain, plus the enhanced query as the user turn.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nrfdocs_config::ApiKey;

use crate::BoxFuture;

use super::source::{AnswerSource, UpstreamAnswer, UpstreamError};

const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai";
const DEFAULT_MODEL: &str = "sonar";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_PROMPT: &str = "You are a documentation search assistant focused on \
    Nordic Semiconductor documentation. Provide accurate, code-focused responses \
    based on Nordic documentation.";

/// Perplexity-backed answer source.
pub struct PerplexityClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl PerplexityClient {
    /// Create a new client with the given credential.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: PERPLEXITY_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for tests or compatible endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the two-turn request body for a prompt.
    fn build_request_body(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                WireMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
        }
    }

    /// Pull the answer text and source references out of the API response.
    fn parse_response(resp: ChatCompletionResponse) -> Result<UpstreamAnswer, UpstreamError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::Parse("no choices in response".to_string()))?;

        let text = match choice.message.content {
            Some(content) if !content.is_empty() => content,
            _ => return Err(UpstreamError::EmptyAnswer),
        };

        let references = choice.message.context.and_then(|ctx| ctx.sources);

        Ok(UpstreamAnswer { text, references })
    }
}

impl AnswerSource for PerplexityClient {
    fn name(&self) -> &str {
        "Perplexity"
    }

    fn ask(&self, prompt: &str) -> BoxFuture<'_, Result<UpstreamAnswer, UpstreamError>> {
        let body = self.build_request_body(prompt);
        Box::pin(async move {
            debug!(model = %body.model, "Perplexity chat request");

            let resp = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .header("authorization", format!("Bearer {}", self.api_key.expose()))
                .header("content-type", "application/json")
                .header("accept", "application/json")
                .timeout(self.timeout)
                .json(&body)
                .send()
                .await
                .map_err(|e| UpstreamError::Network(e.to_string()))?;

            let status = resp.status();
            if status.as_u16() == 401 {
                let body = resp.text().await.unwrap_or_default();
                return Err(UpstreamError::Auth(body));
            }
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(UpstreamError::Http {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or("").to_string(),
                    body,
                });
            }

            let api_resp: ChatCompletionResponse = resp
                .json()
                .await
                .map_err(|e| UpstreamError::Parse(e.to_string()))?;

            Self::parse_response(api_resp)
        })
    }
}

// ── Wire types (private) ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    #[serde(default)]
    context: Option<WireContext>,
}

#[derive(Debug, Deserialize)]
struct WireContext {
    #[serde(default)]
    sources: Option<Vec<String>>,
}
