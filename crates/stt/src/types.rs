use serde::{Deserialize, Serialize};

/// Audio submitted for transcription
#[derive(Debug)]
pub struct TranscriptionRequest {
    /// Raw audio data
    pub audio: Vec<u8>,
    /// Filename reported to the provider
    pub filename: String,
    /// Content type of the audio
    pub content_type: String,
}

impl TranscriptionRequest {
    /// Audio as recorded by browsers through `MediaRecorder`
    pub fn webm(audio: Vec<u8>) -> Self {
        Self {
            audio,
            filename: "audio.webm".to_string(),
            content_type: "audio/webm".to_string(),
        }
    }
}

/// Transcription response following `OpenAI` Whisper API format
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Transcribed text
    pub text: String,
}
