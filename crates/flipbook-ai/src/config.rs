//! Generative capability configuration persistence and model selection.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODELS_ENV: &str = "GEMINI_MODELS";
pub const TIMEOUT_ENV: &str = "GEMINI_TIMEOUT_SECS";

/// Stored capability configuration (persisted to ai-config.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Models tried in order until one answers.
    #[serde(default = "default_models")]
    pub models: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Path to config file for saving.
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_models() -> Vec<String> {
    vec![DEFAULT_GEMINI_MODEL.into()]
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            models: default_models(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            config_path: PathBuf::new(),
        }
    }
}

impl AiConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        let mut config = Self::from_file(config_path);
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Load config from file only. Missing or unreadable files yield defaults.
    pub fn from_file(config_path: &Path) -> Self {
        let mut config: AiConfig = std::fs::read_to_string(config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        config.config_path = config_path.to_path_buf();
        if config.models.is_empty() {
            config.models = default_models();
        }
        config
    }

    /// Fill gaps from the environment. The key only comes from env when the
    /// file has none; model list and timeout override the file when set.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.api_key().is_none() {
            self.api_key = lookup(API_KEY_ENV);
        }
        if let Some(models) = lookup(MODELS_ENV).map(|raw| parse_model_list(&raw)) {
            if !models.is_empty() {
                self.models = models;
            }
        }
        if let Some(secs) = lookup(TIMEOUT_ENV).and_then(|raw| raw.trim().parse::<u64>().ok()) {
            if secs > 0 {
                self.timeout_secs = secs;
            }
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&self.config_path, json)?;
        info!("Saved AI config to {}", self.config_path.display());
        Ok(())
    }

    /// The credential, if one is set. Blank keys count as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Split a comma-separated model list, dropping blanks.
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}
