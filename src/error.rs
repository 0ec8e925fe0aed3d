//! Structured error types for the Folio layout engine.
//!
//! Three variants cover the real error sources: JSON that does not parse,
//! custom font loading, and requests that cannot be laid out. A request that
//! parses as JSON but has the wrong shape (a missing `contentBlocks`, an
//! unknown block type, a negative column count) is invalid input, not a parse
//! failure. Text measurement failures are absent: they are recovered per line
//! inside the engine.

use thiserror::Error;

/// The unified error type returned by all public Folio API functions.
#[derive(Debug, Error)]
pub enum FolioError {
    /// The input is not well-formed JSON.
    #[error("Failed to parse request: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// A custom font could not be decoded or parsed.
    #[error("Font error: {0}")]
    Font(String),
    /// The request is well-formed JSON but cannot be laid out: missing or
    /// mistyped fields, zero columns, a margin that eats the page, a
    /// non-positive column width, and so on.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl FolioError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FolioError::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                return FolioError::InvalidInput(format!(
                    "request does not match the expected shape: {}",
                    e
                ));
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input, is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::Parse { source: e, hint }
    }
}
