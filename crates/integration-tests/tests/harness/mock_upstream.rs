//! Mock AI upstream for integration tests
//!
//! Serves a Whisper-style `/v1/audio/transcriptions` and an OpenAI-style
//! `/v1/chat/completions` from one listener, counting calls and keeping the
//! last request each endpoint received.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

pub const TRANSCRIPT: &str = "a loud, ringing 'weee-ah, hyo-hyo' whistle over a lake";

/// Canned behaviour of one mock endpoint
#[derive(Debug, Clone)]
pub enum Reply {
    /// Succeed with this payload text
    Text(String),
    /// Fail with this status and body
    Status(u16, String),
    /// Succeed with a raw JSON body, for malformed-envelope cases
    RawJson(serde_json::Value),
}

impl Reply {
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Multipart fields of the last transcription request
#[derive(Debug, Clone, Default)]
pub struct TranscriptionCall {
    pub authorization: String,
    pub model: String,
    pub file_name: String,
    pub content_type: String,
    pub audio: Vec<u8>,
}

pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    transcription_count: AtomicU32,
    completion_count: AtomicU32,
    transcription_reply: Reply,
    completion_reply: Reply,
    last_transcription: Mutex<Option<TranscriptionCall>>,
    last_completion: Mutex<Option<serde_json::Value>>,
}

impl MockUpstream {
    /// Start a mock whose model answers with `completion`
    pub async fn start(completion: &str) -> anyhow::Result<Self> {
        Self::start_with(Reply::text(TRANSCRIPT), Reply::text(completion)).await
    }

    pub async fn start_with(transcription_reply: Reply, completion_reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            transcription_count: AtomicU32::new(0),
            completion_count: AtomicU32::new(0),
            transcription_reply,
            completion_reply,
            last_transcription: Mutex::new(None),
            last_completion: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for both upstream services, including `/v1`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn transcription_count(&self) -> u32 {
        self.state.transcription_count.load(Ordering::Relaxed)
    }

    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    pub fn last_transcription(&self) -> Option<TranscriptionCall> {
        self.state.last_transcription.lock().unwrap().clone()
    }

    /// Last chat-completions request body as JSON
    pub fn last_completion(&self) -> Option<serde_json::Value> {
        self.state.last_completion.lock().unwrap().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.transcription_count.fetch_add(1, Ordering::Relaxed);

    let mut call = TranscriptionCall {
        authorization: bearer(&headers),
        ..TranscriptionCall::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();

        match name.as_str() {
            "file" => {
                call.file_name = field.file_name().unwrap_or_default().to_owned();
                call.content_type = field.content_type().unwrap_or_default().to_owned();
                call.audio = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            }
            "model" => call.model = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    *state.last_transcription.lock().unwrap() = Some(call);

    match &state.transcription_reply {
        Reply::Text(text) => Json(serde_json::json!({ "text": text })).into_response(),
        Reply::Status(status, body) => status_reply(*status, body),
        Reply::RawJson(value) => Json(value.clone()).into_response(),
    }
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    Json(request): Json<serde_json::Value>,
) -> Response {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    *state.last_completion.lock().unwrap() = Some(request);

    match &state.completion_reply {
        Reply::Text(content) => Json(serde_json::json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "created": 0,
            "model": "mock-model",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop",
            }],
        }))
        .into_response(),
        Reply::Status(status, body) => status_reply(*status, body),
        Reply::RawJson(value) => Json(value.clone()).into_response(),
    }
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

fn status_reply(status: u16, body: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, body.to_owned()).into_response()
}
