//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Lower bound on the pause between consecutive metadata lookups.
pub const MIN_REQUEST_DELAY_MS: u64 = 250;

/// Paths to the Marquee data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Catalog text file (`data/catalog.txt`).
    pub catalog_file: PathBuf,
    /// Generative API configuration (`data/gemini-config.json`).
    pub gemini_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates the root if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            catalog_file: root.join("catalog.txt"),
            gemini_config_file: root.join("gemini-config.json"),
            root,
        };
        std::fs::create_dir_all(&paths.root)?;
        Ok(paths)
    }
}

/// Metadata service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbSettings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    /// Pause between consecutive lookups, never below [`MIN_REQUEST_DELAY_MS`].
    pub request_delay_ms: u64,
}

impl TmdbSettings {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms.max(MIN_REQUEST_DELAY_MS))
    }
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_TMDB_BASE_URL.into(),
            request_delay_ms: MIN_REQUEST_DELAY_MS,
        }
    }
}

/// Top-level Marquee configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    pub tmdb: TmdbSettings,
    /// Number of catalog entries returned when browsing without a query.
    pub sample_size: usize,
}

impl MarqueeConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    pub fn from_lookup<F>(data_dir: impl AsRef<Path>, lookup: F) -> std::io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let mut data_paths = DataPaths::new(data_dir)?;
        if let Some(catalog) = lookup("MARQUEE_CATALOG_PATH") {
            data_paths.catalog_file = PathBuf::from(catalog);
        }

        let request_delay_ms = lookup("TMDB_REQUEST_DELAY_MS")
            .and_then(|d| d.parse::<u64>().ok())
            .unwrap_or(MIN_REQUEST_DELAY_MS)
            .max(MIN_REQUEST_DELAY_MS);

        let tmdb = TmdbSettings {
            api_key: lookup("TMDB_API_KEY").filter(|k| !k.trim().is_empty()),
            base_url: lookup("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.into()),
            request_delay_ms,
        };

        let sample_size = lookup("MARQUEE_SAMPLE_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SAMPLE_SIZE);

        Ok(Self {
            port,
            data_paths,
            tmdb,
            sample_size,
        })
    }
}
