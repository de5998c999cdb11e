use thiserror::Error;

/// Message returned when the model answers without any candidate.
pub const EMPTY_RESULT_MESSAGE: &str =
    "The model did not return a response. This might be due to a safety filter.";

/// Message returned when the server holds no downstream credential.
pub const MISSING_API_KEY_MESSAGE: &str = "Server configuration error: Missing API Key";

/// Message returned when the downstream API could not be reached or parsed.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Gemini API request failed";

/// Gemini API errors
#[derive(Error, Debug)]
pub enum GeminiError {
    /// No API key is configured on the server.
    #[error("{}", MISSING_API_KEY_MESSAGE)]
    ConfigError,

    /// The API answered with an explicit `error` payload.
    #[error("{0}")]
    DownstreamError(String),

    /// The API answered but produced no candidates, usually a safety block.
    #[error("{}", EMPTY_RESULT_MESSAGE)]
    EmptyResult,

    /// Network, status or decoding failure while talking to the API.
    #[error("{}: {}", TRANSPORT_FAILURE_MESSAGE, .details)]
    TransportError { details: String },
}

impl GeminiError {
    pub(crate) fn transport(details: impl std::fmt::Display) -> Self {
        GeminiError::TransportError {
            details: details.to_string(),
        }
    }

    /// The user-facing message, without the transport details.
    pub fn message(&self) -> String {
        match self {
            GeminiError::TransportError { .. } => TRANSPORT_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Underlying detail for transport failures.
    pub fn details(&self) -> Option<&str> {
        match self {
            GeminiError::TransportError { details } => Some(details),
            _ => None,
        }
    }
}

/// Result type for Gemini operations
pub type GeminiResult<T> = Result<T, GeminiError>;
