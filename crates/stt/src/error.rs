use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription provider errors
#[derive(Debug, Error)]
pub enum SttError {
    /// The request could not be encoded for the provider
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider API returned a non-success status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Provider answered with a body that is not a transcription
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Client construction failed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
