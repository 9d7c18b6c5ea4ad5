//! Shared types for the bird identification relay
//!
//! The identification record, the normalizer that turns free-form model
//! replies into records, and the error contract used by the HTTP layer.

#![allow(clippy::must_use_candidate)]

mod error;
mod normalize;
mod record;

pub use error::HttpError;
pub use normalize::{Normalized, normalize, strip_fences};
pub use record::{FALLBACK_BIRD_NAME, FALLBACK_CONFIDENCE, IdentificationKind, IdentificationRecord, field};
