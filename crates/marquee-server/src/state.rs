//! Shared application state.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use marquee_core::{CatalogEntry, Error, MarqueeConfig, Result};
use marquee_generate::GeminiConfig;
use marquee_ingest::parse_catalog;
use marquee_metadata::TmdbClient;
use parking_lot::RwLock;
use tracing::{info, warn};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: MarqueeConfig,
    /// Parsed catalog; `None` when the catalog file could not be read.
    pub catalog: Option<Vec<CatalogEntry>>,
    /// Only present when a TMDB credential is configured.
    pub tmdb: Option<TmdbClient>,
    pub gemini_config: GeminiConfig,
    pub http: reqwest::Client,
    genres: RwLock<Option<Arc<HashMap<i64, String>>>>,
}

impl AppState {
    pub fn new(config: MarqueeConfig, gemini_config: GeminiConfig) -> Self {
        let catalog = Self::load_catalog(&config.data_paths.catalog_file);

        let tmdb = match TmdbClient::new(&config.tmdb) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Metadata lookups disabled: {}", e);
                None
            }
        };

        if !gemini_config.is_configured() {
            warn!("Gemini API key is not configured; generation endpoints will fail");
        }

        Self {
            config,
            catalog,
            tmdb,
            gemini_config,
            http: reqwest::Client::new(),
            genres: RwLock::new(None),
        }
    }

    fn load_catalog(path: &Path) -> Option<Vec<CatalogEntry>> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let entries = parse_catalog(&content);
                info!("Loaded {} catalog entries from {}", entries.len(), path.display());
                Some(entries)
            }
            Err(e) => {
                warn!("Movie list file not found at {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn tmdb(&self) -> Result<&TmdbClient> {
        self.tmdb
            .as_ref()
            .ok_or_else(|| Error::Config("TMDB API key is not configured".into()))
    }

    /// Genre map, fetched once and cached.
    pub async fn genres(&self) -> Result<Arc<HashMap<i64, String>>> {
        let cached = self.genres.read().clone();
        if let Some(genres) = cached {
            return Ok(genres);
        }

        let fetched = Arc::new(self.tmdb()?.genres().await?);
        *self.genres.write() = Some(fetched.clone());
        Ok(fetched)
    }
}
