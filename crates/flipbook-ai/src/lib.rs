//! Brochure content generation with an external generative model (Gemini).
//!
//! Three stages run per request: describe every image, enhance the user's
//! copy, then fuse both into a final title, description and image layout.
//! Every stage has a deterministic fallback, so the pipeline never fails.

pub mod config;
pub mod describer;
pub mod enhancer;
pub mod error;
pub mod finalizer;
pub mod parser;
pub mod pipeline;
pub mod providers;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::AiConfig;
pub use error::CapabilityError;
pub use pipeline::{filter_valid_image_urls, BrochurePipeline};
pub use providers::{ContentGenerator, GeminiGenerator, GenAiClient};
pub use types::*;
