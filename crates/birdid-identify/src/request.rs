//! Inbound request bodies

use axum::extract::{FromRequest, Request};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::IdentifyError;

/// Largest accepted request body
pub const BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Body of `POST /identify-bird-audio`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRequest {
    /// Base64-encoded audio clip
    #[serde(default)]
    pub audio_base64: Option<String>,
}

/// Body of `POST /identify-bird-image`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    /// Data URL of the photo, passed to the model unchanged
    #[serde(default)]
    pub image_base64: Option<String>,
}

/// JSON body extractor that reports failures as [`IdentifyError`]
///
/// Unlike `axum::Json` it ignores the content type, treats an empty body as
/// `{}` and renders every rejection in the relay's error shape.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = IdentifyError;

    async fn from_request(request: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT)
            .await
            .map_err(|e| IdentifyError::InvalidInput(format!("failed to read request body: {e}")))?;

        let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(bytes)
            .map(Payload)
            .map_err(|e| IdentifyError::InvalidInput(format!("malformed JSON body: {e}")))
    }
}

/// Treat absent and blank payload fields alike
pub(crate) fn required<'a>(value: Option<&'a str>, what: &'static str) -> Result<&'a str, IdentifyError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(IdentifyError::InputMissing(what)),
    }
}

/// Decode base64 audio, tolerating embedded whitespace and a data-URL prefix
pub(crate) fn decode_audio(encoded: &str) -> Result<Vec<u8>, IdentifyError> {
    let encoded = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };

    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    STANDARD
        .decode(compact)
        .map_err(|e| IdentifyError::InvalidInput(format!("audio is not valid base64: {e}")))
}
