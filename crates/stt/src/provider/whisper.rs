use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::SttError,
    http_client::build_http_client,
    types::{TranscriptionRequest, TranscriptionResponse},
};

use super::SttProvider;

/// `OpenAI` Whisper STT provider
pub struct WhisperProvider {
    client: Client,
    base_url: Url,
    api_key: SecretString,
    model: String,
}

impl WhisperProvider {
    pub fn new(api_key: SecretString, base_url: Url, model: String) -> crate::error::Result<Self> {
        let client = build_http_client().map_err(|e| SttError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
        })
    }

    fn transcriptions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/audio/transcriptions")
    }
}

#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

#[async_trait]
impl SttProvider for WhisperProvider {
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResponse> {
        tracing::debug!(
            bytes = request.audio.len(),
            model = %self.model,
            "sending Whisper transcription request"
        );

        let file = reqwest::multipart::Part::bytes(request.audio)
            .file_name(request.filename)
            .mime_str(&request.content_type)
            .map_err(|e| SttError::InvalidRequest(format!("Invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(self.transcriptions_url())
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Whisper request failed: {e}");
                SttError::ConnectionError(format!("Failed to send request to Whisper: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(status = %status, body = %error_text, "Whisper API error");

            return Err(SttError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Whisper response: {e}");
            SttError::InvalidResponse(e.to_string())
        })?;

        tracing::debug!(chars = result.text.len(), "Whisper transcription complete");

        Ok(TranscriptionResponse { text: result.text })
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
