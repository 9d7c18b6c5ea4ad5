use std::sync::Arc;

use birdid_config::Config;
use stt::{SttProvider, WhisperProvider};

use crate::{
    error::{IdentifyError, Result},
    gateway::{ChatCompletion, ChatGateway},
};

/// Upstream clients shared by every request
///
/// A client is absent when its credential is not configured. The process still
/// serves pre-flight and health requests in that state, and identification
/// requests that need the missing client fail with a configuration error.
#[derive(Clone, Default)]
pub struct UpstreamContext {
    transcriber: Option<Arc<dyn SttProvider>>,
    chat: Option<Arc<dyn ChatCompletion>>,
}

impl UpstreamContext {
    pub fn new(transcriber: Option<Arc<dyn SttProvider>>, chat: Option<Arc<dyn ChatCompletion>>) -> Self {
        Self { transcriber, chat }
    }

    /// Build clients for every configured credential
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let transcriber = match config.stt.credential() {
            Some(key) => {
                let provider = WhisperProvider::new(key.clone(), config.stt.base_url.clone(), config.stt.model.clone())?;
                tracing::debug!(model = %config.stt.model, "transcription client ready");
                Some(Arc::new(provider) as Arc<dyn SttProvider>)
            }
            None => None,
        };

        let chat = match config.llm.credential() {
            Some(key) => {
                let gateway = ChatGateway::new(key.clone(), config.llm.base_url.clone(), config.llm.model.clone())?;
                tracing::debug!(model = %config.llm.model, "gateway client ready");
                Some(Arc::new(gateway) as Arc<dyn ChatCompletion>)
            }
            None => None,
        };

        Ok(Self { transcriber, chat })
    }

    pub(crate) fn transcriber(&self) -> Result<&dyn SttProvider> {
        self.transcriber
            .as_deref()
            .ok_or_else(|| IdentifyError::Configuration("transcription API key is not configured".to_owned()))
    }

    pub(crate) fn chat(&self) -> Result<&dyn ChatCompletion> {
        self.chat
            .as_deref()
            .ok_or_else(|| IdentifyError::Configuration("AI gateway API key is not configured".to_owned()))
    }
}
