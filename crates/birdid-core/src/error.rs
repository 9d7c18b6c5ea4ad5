use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by the relay's error types. The server layer renders them,
/// keeping domain errors decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `input_missing`), used for logs and metrics
    fn error_type(&self) -> &'static str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}
