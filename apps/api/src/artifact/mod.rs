//! AI-output handling shared by every generation domain: fence stripping,
//! strict typed decoding, and per-artifact schema validation.
//!
//! Nothing here talks to the network or the database. The retry executor
//! composes these pieces with a `TextGenerator` call into one retryable
//! attempt.

use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod schema;
pub mod types;

/// Schema or decode failure on AI output. Carries the artifact name and a
/// human-readable description of the offending clause or field.
#[derive(Debug, Error)]
#[error("malformed {artifact}: {detail}")]
pub struct MalformedArtifact {
    pub artifact: &'static str,
    pub detail: String,
}

impl MalformedArtifact {
    pub fn new(artifact: &'static str, detail: impl Into<String>) -> Self {
        Self {
            artifact,
            detail: detail.into(),
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences and surrounding
/// whitespace from LLM output. Does not attempt to parse the remainder.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    // Fence may carry a language tag on the opening line
    let inner = inner.strip_prefix("json").unwrap_or(inner).trim_start();
    match inner.strip_suffix("```") {
        Some(body) => body.trim(),
        None => inner,
    }
}

/// Decodes sanitized text into a typed payload. Field presence and basic
/// shape are enforced by the decoder itself; range and membership checks
/// live in [`schema`].
pub fn parse_payload<T: DeserializeOwned>(
    artifact: &'static str,
    text: &str,
) -> Result<T, MalformedArtifact> {
    serde_json::from_str(text).map_err(|e| MalformedArtifact::new(artifact, e.to_string()))
}
