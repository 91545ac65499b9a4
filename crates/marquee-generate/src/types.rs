//! Request and response types for the generation endpoints.

use serde::{Deserialize, Serialize};

use marquee_core::{Error, Result};

/// Incoming generation request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl GenerateRequest {
    /// Both fields must be present and non-blank.
    pub fn validate(&self) -> Result<(&str, &str)> {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        let overview = self.overview.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() || overview.is_empty() {
            return Err(Error::BadRequest("Title and overview are required".into()));
        }
        Ok((title, overview))
    }
}

/// Plain synopsis response.
#[derive(Debug, Clone, Serialize)]
pub struct SynopsisResponse {
    pub synopsis: String,
}

/// Public generative config status (no API key exposed).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiConfigResponse {
    pub configured: bool,
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: usize,
}
