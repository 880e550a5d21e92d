//! Canned [`AnswerSource`] implementations.
//!
//! [`StubSource`] returns a fixed answer and records the prompts it was
//! asked; [`FailingSource`] fails every call with a chosen upstream error.
//! Both exist so the protocol front-end can be tested without touching the
//! network.

use std::sync::Mutex;

use nrfdocs_core::upstream::{AnswerSource, UpstreamAnswer, UpstreamError};
use nrfdocs_core::BoxFuture;

/// Answer source that returns a fixed answer and records prompts.
pub struct StubSource {
    answer: String,
    references: Option<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            references: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Attach source references to the canned answer.
    pub fn with_references(mut self, references: Vec<String>) -> Self {
        self.references = Some(references);
        self
    }

    /// Snapshot of every prompt this source has been asked.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

impl AnswerSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    fn ask(&self, prompt: &str) -> BoxFuture<'_, Result<UpstreamAnswer, UpstreamError>> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let answer = UpstreamAnswer {
            text: self.answer.clone(),
            references: self.references.clone(),
        };
        Box::pin(async move { Ok(answer) })
    }
}

/// Answer source that fails every call.
pub struct FailingSource {
    status: u16,
}

impl FailingSource {
    /// Fail with a 401 authentication error.
    pub fn unauthorized() -> Self {
        Self { status: 401 }
    }

    /// Fail with an arbitrary HTTP status.
    pub fn http(status: u16) -> Self {
        Self { status }
    }
}

impl AnswerSource for FailingSource {
    fn name(&self) -> &str {
        "failing-stub"
    }

    fn ask(&self, _prompt: &str) -> BoxFuture<'_, Result<UpstreamAnswer, UpstreamError>> {
        let error = match self.status {
            401 => UpstreamError::Auth("401 Unauthorized".to_string()),
            status => UpstreamError::Http {
                status,
                status_text: "Error".to_string(),
                body: String::new(),
            },
        };
        Box::pin(async move { Err(error) })
    }
}
