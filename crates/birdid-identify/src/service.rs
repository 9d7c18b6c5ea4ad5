use std::time::Instant;

use birdid_core::{HttpError, IdentificationKind, Normalized, normalize};
use birdid_telemetry::IdentificationMetrics;
use stt::TranscriptionRequest;

use crate::{
    context::UpstreamContext,
    error::{Result, Upstream},
    prompt,
    request::{AudioRequest, ImageRequest, decode_audio, required},
};

/// Runs both identification paths against the configured upstreams
pub struct Identifier {
    context: UpstreamContext,
    metrics: IdentificationMetrics,
}

impl Identifier {
    pub fn new(context: UpstreamContext, metrics: IdentificationMetrics) -> Self {
        Self { context, metrics }
    }

    /// Transcribe the clip, then ask the model which bird made the sound
    pub async fn identify_audio(&self, request: AudioRequest) -> Result<Normalized> {
        let kind = IdentificationKind::Audio;
        let result = self.audio(request).await;
        self.record(kind, &result);
        result
    }

    /// Ask the model which bird is in the photo
    pub async fn identify_image(&self, request: ImageRequest) -> Result<Normalized> {
        let kind = IdentificationKind::Image;
        let result = self.image(request).await;
        self.record(kind, &result);
        result
    }

    async fn audio(&self, request: AudioRequest) -> Result<Normalized> {
        let encoded = required(request.audio_base64.as_deref(), "audio data")?;

        let transcriber = self.context.transcriber()?;
        let chat = self.context.chat()?;

        let audio = decode_audio(encoded)?;
        tracing::debug!(bytes = audio.len(), "identifying bird from audio");

        let start = Instant::now();
        let transcription = transcriber.transcribe(TranscriptionRequest::webm(audio)).await;
        self.metrics.record_upstream(Upstream::Transcription.as_str(), start);
        let description = transcription?.text;

        tracing::debug!(chars = description.len(), provider = transcriber.name(), "audio transcribed");

        let start = Instant::now();
        let reply = chat.complete(prompt::audio_messages(&description)).await;
        self.metrics.record_upstream(Upstream::Gateway.as_str(), start);

        Ok(normalize(&reply?, IdentificationKind::Audio))
    }

    async fn image(&self, request: ImageRequest) -> Result<Normalized> {
        let image_url = required(request.image_base64.as_deref(), "image data")?;
        let chat = self.context.chat()?;

        tracing::debug!(bytes = image_url.len(), "identifying bird from image");

        let start = Instant::now();
        let reply = chat.complete(prompt::image_messages(image_url)).await;
        self.metrics.record_upstream(Upstream::Gateway.as_str(), start);

        Ok(normalize(&reply?, IdentificationKind::Image))
    }

    fn record(&self, kind: IdentificationKind, result: &Result<Normalized>) {
        let outcome = match result {
            Ok(normalized) => normalized.outcome(),
            Err(e) => e.error_type(),
        };

        tracing::info!(%kind, outcome, "identification finished");
        self.metrics.record_identification(kind.as_str(), outcome);
    }
}
