/*!
 * Error types for the traduct library.
 *
 * This module contains the typed errors surfaced by the translation facade,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to a translation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse engine response: {0}")]
    ParseError(String),

    /// Error returned by the engine API itself
    #[error("Engine responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Operation the engine does not implement (e.g. detection)
    #[error("Unsupported engine operation: {0}")]
    Unsupported(String),
}

impl EngineError {
    /// Whether a failed call may succeed when attempted again
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::RequestFailed(_) => true,
            EngineError::ConnectionError(_) => true,
            EngineError::Timeout(_) => true,
            EngineError::RateLimitExceeded(_) => true,
            EngineError::ApiError { status_code, .. } => *status_code >= 500,
            EngineError::ParseError(_) => false,
            EngineError::Unsupported(_) => false,
        }
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            // reqwest does not expose the configured timeout value here
            EngineError::Timeout(Duration::from_secs(0))
        } else if error.is_connect() {
            EngineError::ConnectionError(error.to_string())
        } else if error.is_decode() {
            EngineError::ParseError(error.to_string())
        } else {
            EngineError::RequestFailed(error.to_string())
        }
    }
}

/// Which side of a language pair a code was used on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRole {
    /// The language translated from
    Source,
    /// The language translated to
    Target,
}

impl std::fmt::Display for LanguageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageRole::Source => write!(f, "source"),
            LanguageRole::Target => write!(f, "target"),
        }
    }
}

/// Errors surfaced by the translation facade
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Structurally invalid input, raised before any network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A language code outside the engine's capability table
    #[error("Unsupported {role} language '{code}' for translation engine '{engine}'")]
    UnsupportedLanguage {
        /// The offending language code
        code: String,
        /// Whether the code was used as source or target
        role: LanguageRole,
        /// Name of the engine that rejected it
        engine: String,
    },

    /// The translation itself failed, after local error handling
    #[error("Translation failed: {message}")]
    Failed {
        /// Human-readable description of the failure
        message: String,
        /// The underlying engine error, when one caused the failure
        #[source]
        source: Option<EngineError>,
    },
}

impl TranslationError {
    /// Create a failure without an underlying engine cause
    pub fn failed(message: impl Into<String>) -> Self {
        TranslationError::Failed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a failure carrying the engine error that caused it
    pub fn failed_with(message: impl Into<String>, source: EngineError) -> Self {
        TranslationError::Failed {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Result type alias used throughout the crate
pub type TranslationResult<T> = Result<T, TranslationError>;
