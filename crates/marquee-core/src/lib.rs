//! Marquee Core — shared records, configuration, and error types.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DataPaths, MarqueeConfig, TmdbSettings};
pub use error::{Error, Result};
pub use types::{CatalogEntry, MovieAnalysis};
