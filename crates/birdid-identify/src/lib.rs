//! Bird identification endpoints
//!
//! Wires the transcription service and the chat-completions gateway behind
//! two JSON endpoints. Model replies are normalized into identification
//! records; an unparseable reply still produces a `200` with a fallback record.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod context;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod protocol;
pub mod request;
mod service;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing};
use birdid_config::Config;
use birdid_core::IdentificationRecord;
use birdid_telemetry::IdentificationMetrics;

pub use context::UpstreamContext;
pub use error::{IdentifyError, Upstream};
pub use gateway::{ChatCompletion, ChatGateway};
pub use request::{AudioRequest, ImageRequest, Payload};
pub use service::Identifier;

pub const AUDIO_PATH: &str = "/identify-bird-audio";
pub const IMAGE_PATH: &str = "/identify-bird-image";

/// Build the identifier from configuration
///
/// Missing credentials are not an error here; the affected requests fail later.
pub fn build_identifier(config: &Config) -> anyhow::Result<Arc<Identifier>> {
    let context = UpstreamContext::from_config(config)?;
    Ok(Arc::new(Identifier::new(context, IdentificationMetrics::new())))
}

/// Router with both identification endpoints
pub fn identify_router(identifier: Arc<Identifier>) -> Router {
    Router::new()
        .route(AUDIO_PATH, routing::post(identify_bird_audio))
        .route(IMAGE_PATH, routing::post(identify_bird_image))
        .with_state(identifier)
}

/// Handle `POST /identify-bird-audio`
async fn identify_bird_audio(
    State(identifier): State<Arc<Identifier>>,
    Payload(request): Payload<AudioRequest>,
) -> Result<Json<IdentificationRecord>, IdentifyError> {
    let normalized = identifier.identify_audio(request).await?;
    Ok(Json(normalized.into_record()))
}

/// Handle `POST /identify-bird-image`
async fn identify_bird_image(
    State(identifier): State<Arc<Identifier>>,
    Payload(request): Payload<ImageRequest>,
) -> Result<Json<IdentificationRecord>, IdentifyError> {
    let normalized = identifier.identify_image(request).await?;
    Ok(Json(normalized.into_record()))
}
