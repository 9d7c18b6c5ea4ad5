use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use birdid_core::HttpError;
use serde::Serialize;
use stt::SttError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdentifyError>;

/// External AI service called by the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    /// Speech-to-text service
    Transcription,
    /// Chat-completions gateway
    Gateway,
}

impl Upstream {
    /// Metric label
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transcription => "transcription",
            Self::Gateway => "gateway",
        }
    }
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Transcription => "Whisper",
            Self::Gateway => "AI",
        })
    }
}

/// Identification request failures
///
/// An unparseable model reply is not an error: it becomes a fallback record.
#[derive(Debug, Error)]
pub enum IdentifyError {
    /// Required payload field absent or empty
    #[error("No {0} provided")]
    InputMissing(&'static str),

    /// Body or payload could not be decoded
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    /// A credential needed for the request is not configured
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream answered with a non-success status
    #[error("{service} API error: {status}")]
    Upstream { service: Upstream, status: u16, body: String },

    /// Upstream could not be reached
    #[error("{service} API connection failed: {message}")]
    Connection { service: Upstream, message: String },

    /// Upstream answered successfully with an unusable body
    #[error("{service} API returned an invalid response: {message}")]
    InvalidUpstreamResponse { service: Upstream, message: String },

    /// Should not happen; details are logged only
    #[error("Internal server error")]
    Internal(String),
}

impl From<SttError> for IdentifyError {
    fn from(error: SttError) -> Self {
        let service = Upstream::Transcription;

        match error {
            SttError::ProviderApiError { status, message } => Self::Upstream {
                service,
                status,
                body: message,
            },
            SttError::ConnectionError(message) => Self::Connection { service, message },
            SttError::InvalidResponse(message) => Self::InvalidUpstreamResponse { service, message },
            SttError::ConfigError(message) => Self::Configuration(message),
            SttError::InvalidRequest(message) => Self::Internal(message),
        }
    }
}

impl HttpError for IdentifyError {
    /// Every failure is reported as 500, which is what relay clients expect
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_type(&self) -> &'static str {
        match self {
            Self::InputMissing(_) => "input_missing",
            Self::InvalidInput(_) => "invalid_input",
            Self::Configuration(_) => "configuration_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Connection { .. } => "connection_error",
            Self::InvalidUpstreamResponse { .. } => "invalid_upstream_response",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

/// Error body returned to relay clients
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for IdentifyError {
    fn into_response(self) -> Response {
        match &self {
            Self::Upstream { service, status, body } => {
                tracing::error!(%service, status, body = %body, "upstream call failed");
            }
            Self::Internal(detail) => tracing::error!(detail = %detail, "internal error"),
            other => tracing::error!(error_type = other.error_type(), error = %other, "identification failed"),
        }

        let body = ErrorResponse {
            error: self.client_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
