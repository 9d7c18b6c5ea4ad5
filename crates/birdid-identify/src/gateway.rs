//! Chat-completions gateway client

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{IdentifyError, Result, Upstream};
use crate::protocol::{ChatMessage, ChatRequest, ChatResponse};

/// A language model that answers a conversation with text
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send `messages` and return the text of the first choice
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// OpenAI-compatible chat-completions gateway
pub struct ChatGateway {
    client: Client,
    base_url: Url,
    api_key: SecretString,
    model: String,
}

impl ChatGateway {
    /// Create a gateway client
    ///
    /// # Errors
    ///
    /// Returns `IdentifyError::Configuration` if the HTTP client cannot be built
    pub fn new(api_key: SecretString, base_url: Url, model: String) -> Result<Self> {
        let client = stt::build_http_client()
            .map_err(|e| IdentifyError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
        })
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl ChatCompletion for ChatGateway {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let service = Upstream::Gateway;
        let wire_request = ChatRequest {
            model: self.model.clone(),
            messages,
        };

        tracing::debug!(model = %self.model, "sending chat completion request");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "gateway request failed");
                IdentifyError::Connection {
                    service,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(IdentifyError::Upstream {
                service,
                status: status.as_u16(),
                body,
            });
        }

        let wire_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| IdentifyError::InvalidUpstreamResponse {
                service,
                message: format!("failed to parse response: {e}"),
            })?;

        wire_response
            .into_first_content()
            .ok_or_else(|| IdentifyError::InvalidUpstreamResponse {
                service,
                message: "response contained no message content".to_owned(),
            })
    }
}
