//! Generative model access.
//!
//! `ContentGenerator` is a single prompt → text call against one model.
//! `GenAiClient` wraps an optional generator with the configured model list,
//! trying each model in turn under a per-call timeout.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::AiConfig;
use crate::error::CapabilityError;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// One prompt → text call against a named model.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, CapabilityError>;
}

/// Google Gemini `generateContent` over HTTPS.
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Point at a different endpoint root (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, CapabilityError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        debug!("Calling {} (prompt_len={})", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CapabilityError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CapabilityError::MalformedResponse(e.to_string()))?;

        extract_candidate_text(&parsed).ok_or(CapabilityError::EmptyResponse)
    }
}

/// Concatenate the text parts of the first candidate. `None` if there is no text.
pub fn extract_candidate_text(response: &serde_json::Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Process-wide handle to the generative capability.
///
/// Built once at startup and shared behind an `Arc`; read-only afterwards.
pub struct GenAiClient {
    generator: Option<Arc<dyn ContentGenerator>>,
    models: Vec<String>,
    timeout: Duration,
}

impl GenAiClient {
    pub fn new(
        generator: Option<Arc<dyn ContentGenerator>>,
        models: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            models,
            timeout,
        }
    }

    /// Client with no credential: every stage takes its fallback.
    pub fn unavailable() -> Self {
        Self::new(None, Vec::new(), Duration::from_secs(1))
    }

    /// Build from configuration. No key means the capability is unavailable.
    pub fn from_config(config: &AiConfig) -> Self {
        let Some(api_key) = config.api_key() else {
            warn!("GEMINI_API_KEY not found. AI features will be disabled.");
            return Self::new(None, config.models.clone(), config.timeout());
        };

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        info!(
            "Gemini enabled: models={:?}, timeout={}s",
            config.models, config.timeout_secs
        );

        let generator: Arc<dyn ContentGenerator> = Arc::new(GeminiGenerator::new(client, api_key));
        Self::new(
            Some(generator),
            config.models.clone(),
            config.timeout(),
        )
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Try each configured model in order, returning the first answer.
    ///
    /// Never touches the network when the capability is unavailable.
    pub async fn generate(&self, prompt: &str) -> Result<String, CapabilityError> {
        let generator = self.generator.as_ref().ok_or(CapabilityError::Unavailable)?;

        let mut last_error = None;
        for model in &self.models {
            debug!("Trying model {}", model);
            match tokio::time::timeout(self.timeout, generator.generate(model, prompt)).await {
                Ok(Ok(text)) => {
                    info!("Model {} answered ({} chars)", model, text.len());
                    return Ok(text);
                }
                Ok(Err(e)) => {
                    warn!("Model {} failed: {}", model, e);
                    last_error = Some(e);
                }
                Err(_) => {
                    warn!("Model {} timed out after {:?}", model, self.timeout);
                    last_error = Some(CapabilityError::Timeout(self.timeout));
                }
            }
        }

        Err(match last_error {
            Some(last) => CapabilityError::AllModelsFailed {
                last: Box::new(last),
            },
            None => CapabilityError::NoModels,
        })
    }
}

/// Test an API key by listing models.
pub async fn test_api_key(api_key: &str) -> Result<(), String> {
    let resp = Client::new()
        .get(format!("{}/models", GEMINI_BASE_URL))
        .header("x-goog-api-key", api_key)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if resp.status().is_success() {
        Ok(())
    } else {
        Err(format!("API returned status {}", resp.status()))
    }
}
