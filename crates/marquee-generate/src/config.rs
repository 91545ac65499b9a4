//! Generative API configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::GeminiConfigResponse;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Stored generative configuration (`gemini-config.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: usize,
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.into()
}
fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.into()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_max_output_tokens() -> usize {
    2048
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            config_path: PathBuf::new(),
        }
    }
}

impl GeminiConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Load config from file, falling back to `lookup` for the API key and model.
    pub fn load_with<F>(config_path: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: GeminiConfig = match std::fs::read_to_string(config_path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!("Ignoring malformed {}: {}", config_path.display(), e);
                GeminiConfig::default()
            }),
            Err(_) => GeminiConfig::default(),
        };

        config.config_path = config_path.to_path_buf();

        if config.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            config.api_key = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.model = model;
        }

        debug!(
            "Gemini config: model={} configured={}",
            config.model,
            config.api_key.is_some()
        );
        config
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the public config response (no API key exposed).
    pub fn to_response(&self) -> GeminiConfigResponse {
        GeminiConfigResponse {
            configured: self.is_configured(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}
