//! Error handling for course-assistant-core
//!
//! Only failures the caller has to deal with live here. Tool failures are
//! [`ToolError`](crate::tools::ToolError)s and are folded into the
//! conversation instead of being returned.

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Main error type for the course-assistant-core library
#[derive(Error, Debug)]
pub enum AssistantError {
    /// The model backend call failed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Caller supplied input that violates a precondition
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Failures raised by a [`ChatCompletionClient`](crate::models::ChatCompletionClient)
#[derive(Error, Debug)]
pub enum ModelError {
    /// The request never produced an HTTP response
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backend rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend is throttling this client
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Any other non-success status
    #[error("API returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParsing(String),
}

impl From<config::ConfigError> for AssistantError {
    fn from(err: config::ConfigError) -> Self {
        AssistantError::Config(err.to_string())
    }
}

impl AssistantError {
    /// Create a generic error with a message
    pub fn other<S: Into<String>>(message: S) -> Self {
        AssistantError::Other(message.into())
    }

    /// Create a validation error with a message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AssistantError::Validation(message.into())
    }

    /// Check if retrying the same call could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AssistantError::Model(ModelError::RateLimited(_))
                | AssistantError::Model(ModelError::RequestFailed(_))
        )
    }
}
