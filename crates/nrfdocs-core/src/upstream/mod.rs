//! Upstream answering API integration.
//!
//! The actual documentation "search" is delegated to a remote completions
//! API. All access goes through the [`AnswerSource`] trait so the protocol
//! front-end can be exercised against stub sources in tests.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐
//! │  McpServer  │────▶│ AnswerSource │  (trait)
//! └─────────────┘     └──────┬───────┘
//!                            │
//!                            ▼
//!                  ┌──────────────────┐
//!                  │ PerplexityClient │
//!                  └──────────────────┘
//! ```

pub mod perplexity;
pub mod source;

use std::sync::Arc;
use std::time::Duration;

use nrfdocs_config::{ConfigError, UpstreamConfig};

pub use perplexity::PerplexityClient;
pub use source::{AnswerSource, UpstreamAnswer, UpstreamError};

/// Build the upstream source from config.
///
/// Resolves the bearer credential from the environment; a missing or empty
/// credential is a fatal startup condition surfaced as
/// [`ConfigError::MissingCredential`].
pub fn create_source(config: &UpstreamConfig) -> Result<Arc<dyn AnswerSource>, ConfigError> {
    let api_key = config.resolve_api_key()?;
    let client = PerplexityClient::new(api_key)
        .with_model(&config.model)
        .with_base_url(&config.base_url)
        .with_timeout(Duration::from_secs(config.timeout_secs));
    Ok(Arc::new(client))
}
