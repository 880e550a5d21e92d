//! Response shaping.
//!
//! Reshapes the raw upstream answer into the outward JSON envelope. The
//! answer text is kept whole in the `description`/`explanation` fields;
//! fenced code blocks and a docs URL are pulled out by regex. Total over any
//! string input; there is no failure path here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::enhance::ResultType;

/// Fixed label reported in `metadata.source`.
pub const SOURCE_LABEL: &str = "Nordic Semiconductor Documentation";

/// Fallback `query` label for an empty answer.
const NO_QUERY: &str = "No query found";

// Fenced block with an optional c/cpp language tag. Blocks tagged with any
// other language are not matched.
static CODE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:c|cpp)?\n([\s\S]*?)```").unwrap());

// First docs.nordicsemi.com URL; stops at whitespace or a closing paren so
// markdown links stay intact.
static SOURCE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://docs\.nordicsemi\.com[^\s)]+").unwrap());

/// The outward response contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedResponse {
    /// First line of the answer, used as a label for the result.
    pub query: String,
    /// Exactly one entry; a list for forward compatibility of the contract.
    pub results: Vec<ResultEntry>,
    pub metadata: ResponseMetadata,
}

/// One formatted result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_reference: Option<ApiReferenceEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_example: Option<CodeExampleEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// API-reference prose. No structured parsing is attempted on the main
/// path; the whole answer is the description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiReferenceEntry {
    pub description: String,
}

/// Extracted code plus the full answer as its explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeExampleEntry {
    pub code: String,
    pub explanation: String,
}

/// Echo of the request plus the fixed source label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub result_type: ResultType,
    pub source: String,
}

/// Shape a raw upstream answer into the outward envelope.
pub fn format_response(raw: &str, result_type: ResultType) -> FormattedResponse {
    let query = raw
        .lines()
        .next()
        .filter(|line| !line.is_empty())
        .unwrap_or(NO_QUERY)
        .to_string();

    let api_reference = (result_type != ResultType::CodeExample).then(|| ApiReferenceEntry {
        description: raw.to_string(),
    });

    let code_example = (result_type != ResultType::ApiReference).then(|| CodeExampleEntry {
        code: extract_code_blocks(raw),
        explanation: raw.to_string(),
    });

    FormattedResponse {
        query,
        results: vec![ResultEntry {
            api_reference,
            code_example,
            source_url: extract_source_url(raw),
        }],
        metadata: ResponseMetadata {
            result_type,
            source: SOURCE_LABEL.to_string(),
        },
    }
}

/// Concatenate all fenced code blocks, double-newline-joined and trimmed.
///
/// Falls back to the whole input when no fenced block is found, so callers
/// always get something usable.
pub fn extract_code_blocks(text: &str) -> String {
    let blocks: Vec<&str> = CODE_BLOCK_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect();

    if blocks.is_empty() {
        return text.to_string();
    }

    blocks.join("\n\n")
}

/// First docs.nordicsemi.com URL in the text, if any.
pub fn extract_source_url(text: &str) -> Option<String> {
    SOURCE_URL_RE.find(text).map(|m| m.as_str().to_string())
}
