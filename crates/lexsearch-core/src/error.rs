//! Error types for lexsearch

use thiserror::Error;

/// Result type alias using LexSearchError
pub type Result<T> = std::result::Result<T, LexSearchError>;

/// Error type alias for convenience
pub type Error = LexSearchError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// How many characters of a raw provider response to keep in diagnostics
pub const RESPONSE_EXCERPT_LEN: usize = 200;

/// Main error type for lexsearch
#[derive(Debug, Error)]
pub enum LexSearchError {
    /// Caller-supplied text is blank; rejected before any remote call.
    #[error("Input text is empty or whitespace-only")]
    EmptyInput,

    /// Remote LLM/embedding call failed (transport, auth, rate limit,
    /// non-success status). Surfaced as-is, never retried.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The query could not be vectorized while composing a search.
    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// Provider response could not be coerced to the expected JSON schema
    /// after fence-stripping and brace-scanning.
    #[error("Unparsable provider response: {message} (excerpt: {excerpt:?})")]
    UnparsableResponse { message: String, excerpt: String },

    #[error("Ruling not found: {0}")]
    RulingNotFound(i64),

    /// Persistence/query layer unreachable or errored.
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LexSearchError {
    /// Build an `UnparsableResponse` carrying a truncated raw-response excerpt
    pub fn unparsable(message: impl Into<String>, raw: &str) -> Self {
        let excerpt: String = raw.chars().take(RESPONSE_EXCERPT_LEN).collect();
        Self::UnparsableResponse {
            message: message.into(),
            excerpt,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RulingNotFound(_) => exit_codes::NOT_FOUND,
            Self::EmptyInput | Self::InvalidInput(_) | Self::Config(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
