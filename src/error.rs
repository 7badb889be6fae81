use thiserror::Error;

/// Raised by the normalizer when no cleanup stage yields parseable JSON.
///
/// Both previews are truncated to the configured preview length so a
/// runaway completion never ends up verbatim in logs or error chains.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("JSON parsing failed: {reason}")]
pub struct ParseFailure {
    pub reason: String,
    pub original_preview: String,
    pub cleaned_preview: String,
}

impl ParseFailure {
    pub fn new(reason: impl Into<String>, original: &str, cleaned: &str, limit: usize) -> Self {
        Self {
            reason: reason.into(),
            original_preview: preview(original, limit),
            cleaned_preview: preview(cleaned, limit),
        }
    }
}

/// First `limit` characters of `s`, never splitting a code point.
pub fn preview(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngredientError {
    #[error("ingredient descriptor is empty")]
    Empty,

    #[error("ingredient descriptor '{0}' has no name before its amount")]
    MissingName(String),
}

#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("generation response is not JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("generation response has no text completion")]
    MissingCompletion,
}
