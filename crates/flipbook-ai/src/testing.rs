//! Scripted generators for exercising the pipeline without network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CapabilityError;
use crate::providers::{ContentGenerator, GenAiClient};

/// Generator answering from a list of prompt-substring routes.
pub struct MockGenerator {
    routes: Vec<(String, Result<String, CapabilityError>)>,
    fallback: Result<String, CapabilityError>,
    failing_models: Vec<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    models_tried: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Answers every prompt with `text`.
    pub fn replying(text: &str) -> Self {
        Self::with_fallback(Ok(text.to_string()))
    }

    /// Fails every prompt.
    pub fn failing() -> Self {
        Self::with_fallback(Err(CapabilityError::Request("connection refused".into())))
    }

    fn with_fallback(fallback: Result<String, CapabilityError>) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
            failing_models: Vec::new(),
            delay: None,
            calls: AtomicUsize::new(0),
            models_tried: Mutex::new(Vec::new()),
        }
    }

    /// Answer prompts containing `needle` with `text`. First matching route wins.
    pub fn route(mut self, needle: &str, text: &str) -> Self {
        self.routes.push((needle.to_string(), Ok(text.to_string())));
        self
    }

    /// Fail prompts containing `needle`.
    pub fn route_failure(mut self, needle: &str) -> Self {
        self.routes.push((
            needle.to_string(),
            Err(CapabilityError::Api {
                status: 503,
                body: "overloaded".into(),
            }),
        ));
        self
    }

    /// Every call against `model` fails.
    pub fn fail_model(mut self, model: &str) -> Self {
        self.failing_models.push(model.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn models_tried(&self) -> Vec<String> {
        self.models_tried.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.models_tried.lock().unwrap().push(model.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_models.iter().any(|m| m == model) {
            return Err(CapabilityError::Api {
                status: 404,
                body: format!("model {} not found", model),
            });
        }

        self.routes
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Available client over `mock` with the given model list.
pub fn client_with(mock: Arc<MockGenerator>, models: &[&str]) -> GenAiClient {
    GenAiClient::new(
        Some(mock as Arc<dyn ContentGenerator>),
        models.iter().map(|m| m.to_string()).collect(),
        Duration::from_secs(2),
    )
}
