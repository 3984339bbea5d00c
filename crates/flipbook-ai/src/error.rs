//! Failures of the generative capability.

use std::time::Duration;

use thiserror::Error;

/// Why a generative call did not produce text.
///
/// None of these escape the pipeline; each stage maps them to its fallback.
#[derive(Error, Debug, Clone)]
pub enum CapabilityError {
    #[error("Generative capability not configured")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("No models configured")]
    NoModels,

    #[error("All models failed. Last error: {last}")]
    AllModelsFailed { last: Box<CapabilityError> },
}
