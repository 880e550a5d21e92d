//! Auxiliary heuristic extraction.
//!
//! A best-effort decomposition of an answer into API-signature guesses and
//! code/language/description triples. The main response path does not call
//! this; it is an exported utility for callers that want a rougher
//! structured view of the answer text.
//!
//! Known failure modes: the signature pattern only recognises the simplest
//! C-style declarations (`returnType name(params)` on one line); pointers,
//! macros, and multi-line prototypes are mis-parsed or skipped. A code
//! segment whose first line happens to be a single word is read as a
//! language tag. Nothing here is a parser.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// C-like function signature: return type, name, parenthesised params.
static SIGNATURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:function|void|uint\d+_t|int\d+_t|\w+)\s+(\w+)\s*\((.*?)\)").unwrap()
});

// A bare language tag on the first line of a fenced segment.
static LANGUAGE_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_+-]+$").unwrap());

/// One fenced code block with its surrounding context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeExample {
    pub code: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A parameter token pair pulled out of a signature guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A speculative API reference. `signature` is the raw matched text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiReference {
    pub name: String,
    pub signature: String,
    pub parameters: Vec<ApiParameter>,
}

/// Everything the heuristic pass managed to pull out of an answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub api_references: Vec<ApiReference>,
    pub code_examples: Vec<CodeExample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Decompose answer text into signature guesses and code examples.
///
/// The text is split on triple-backtick fences; segments alternate
/// prose/code. Prose that matches the signature shape becomes an
/// [`ApiReference`]; other prose accumulates as the description of the next
/// code segment. Prose left over at the end becomes the top-level
/// description.
pub fn extract_content(text: &str) -> ExtractedContent {
    let mut result = ExtractedContent::default();
    let mut pending_description = String::new();

    for (i, segment) in text.split("```").enumerate() {
        if segment.trim().is_empty() {
            continue;
        }

        if i % 2 == 0 {
            // Prose segment
            let prose = segment.trim();
            if let Some(caps) = SIGNATURE_RE.captures(prose) {
                result.api_references.push(ApiReference {
                    name: caps[1].to_string(),
                    signature: caps[0].to_string(),
                    parameters: parse_parameters(&caps[2]),
                });
            } else {
                pending_description.push_str(prose);
                pending_description.push('\n');
            }
        } else {
            // Code segment; an optional language tag sits on the first line
            let (language, code) = split_language_tag(segment);
            let description = {
                let pending = pending_description.trim();
                (!pending.is_empty()).then(|| pending.to_string())
            };
            pending_description.clear();
            result.code_examples.push(CodeExample {
                code: code.trim().to_string(),
                language,
                description,
            });
        }
    }

    let leftover = pending_description.trim();
    if !leftover.is_empty() {
        result.description = Some(leftover.to_string());
    }

    result
}

/// Split a comma-separated parameter list into `type name` pairs.
///
/// Each parameter is whitespace-split; the first token is the type, the
/// second the name. Pairs lacking either token are discarded.
fn parse_parameters(params: &str) -> Vec<ApiParameter> {
    params
        .split(',')
        .filter_map(|param| {
            let mut tokens = param.trim().split_whitespace();
            let type_name = tokens.next()?;
            let name = tokens.next()?;
            Some(ApiParameter {
                name: name.to_string(),
                type_name: type_name.to_string(),
            })
        })
        .collect()
}

/// Peel an optional language tag off a fenced segment. Defaults to `c`.
fn split_language_tag(segment: &str) -> (String, &str) {
    if let Some((first_line, rest)) = segment.split_once('\n') {
        let tag = first_line.trim();
        if LANGUAGE_TAG_RE.is_match(tag) {
            return (tag.to_string(), rest);
        }
    }
    ("c".to_string(), segment)
}
