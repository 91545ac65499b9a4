//! Marquee Ingest — catalog parsing, sampling, fuzzy matching, and
//! structured extraction from generated documents.

pub mod catalog;
pub mod extract;
pub mod matcher;
pub mod sampling;

pub use catalog::{parse_catalog, CatalogParser};
pub use extract::{clean_markdown, extract_analysis, CATEGORY_HEADERS};
pub use matcher::{filter_entries, fuzzy_match};
pub use sampling::{sample, sample_with};
