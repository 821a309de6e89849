//! Error types for the completion layer.

use thiserror::Error;

/// Errors that can occur while talking to a completion provider.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The provider endpoint could not be reached.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The requested model is not served by the provider.
    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    /// The provider answered with a non-success HTTP status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Provider configuration is unusable.
    #[error("invalid provider configuration: {0}")]
    Configuration(String),

    /// Underlying HTTP transport error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
