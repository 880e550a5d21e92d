//! Query augmentation.
//!
//! Turns a raw free-text query plus optional hints into the prompt sent
//! upstream. Pure string assembly: deterministic, no failure modes, any
//! input accepted as-is.

use serde::{Deserialize, Serialize};

/// Which result sub-objects the caller wants populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Function signatures, parameters, return values.
    ApiReference,
    /// Worked code examples with explanations.
    CodeExample,
    /// Both of the above.
    #[default]
    Both,
}

/// Per-request query hints. Constructed once per call, never persisted.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    /// SDK version to focus on (e.g. "nRF5 SDK v17.1.0").
    pub sdk_version: Option<String>,
    /// Requested result filter; `None` behaves like [`ResultType::Both`].
    pub result_type: Option<ResultType>,
}

/// Build the augmented prompt for a query.
///
/// The query is restated verbatim, followed by an optional version hint, a
/// result-type instruction, and two fixed formatting instructions. Parts are
/// newline-joined.
pub fn enhance_query(query: &str, context: &QueryContext) -> String {
    let mut parts: Vec<String> = vec![format!(
        "From Nordic Semiconductor documentation (https://docs.nordicsemi.com/), \
         provide information about: {query}"
    )];

    if let Some(ref version) = context.sdk_version {
        parts.push(format!("Focus on documentation for {version}."));
    }

    match context.result_type {
        Some(ResultType::ApiReference) => parts.push(
            "Focus on API references, including function signatures, parameters, \
             return values, and brief usage examples."
                .to_string(),
        ),
        Some(ResultType::CodeExample) => {
            parts.push("Focus on providing detailed code examples with explanations.".to_string())
        }
        _ => parts
            .push("Include both API references and code examples if available.".to_string()),
    }

    parts.push("Format the response to be easily parsed for code generation.".to_string());
    parts.push(
        "Structure the response with clear sections for API details and code examples."
            .to_string(),
    );

    parts.join("\n")
}
