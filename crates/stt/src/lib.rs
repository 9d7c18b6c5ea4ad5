#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Speech-to-text providers used by the audio identification path

mod error;
mod http_client;
mod provider;
mod types;

pub use error::{Result, SttError};
pub use http_client::build_http_client;
pub use provider::{SttProvider, whisper::WhisperProvider};
pub use types::{TranscriptionRequest, TranscriptionResponse};
