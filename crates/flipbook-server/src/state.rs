//! Shared application state.

use std::sync::Arc;

use flipbook_ai::{AiConfig, BrochurePipeline, GenAiClient};
use flipbook_core::FlipbookConfig;
use flipbook_store::BrochureStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: FlipbookConfig,
    pub store: BrochureStore,
    pub ai_config: AiConfig,
    pub pipeline: BrochurePipeline,
}

impl AppState {
    /// Build state, constructing the capability client once from `ai_config`.
    pub fn new(config: FlipbookConfig, store: BrochureStore, ai_config: AiConfig) -> Self {
        let ai = Arc::new(GenAiClient::from_config(&ai_config));
        let pipeline = BrochurePipeline::new(ai);

        Self {
            config,
            store,
            ai_config,
            pipeline,
        }
    }
}
