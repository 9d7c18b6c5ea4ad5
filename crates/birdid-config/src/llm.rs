use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://ai.gateway.reggie.dev/v1";
const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Chat-completions gateway configuration
///
/// The gateway must speak the `OpenAI` chat-completions format and accept
/// `image_url` content parts for the image path.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Gateway credential; empty counts as unset
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL, `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Multimodal model used for both identification paths
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

impl LlmConfig {
    /// The configured credential, ignoring blank values
    pub fn credential(&self) -> Option<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
