//! Structured extraction from generated documents.
//!
//! Generated synopses loosely follow a template of section anchors. The
//! extractor turns one document into a [`MovieAnalysis`] record and never
//! fails: missing sections degrade to empty fields.
//!
//! [`MovieAnalysis`]: marquee_core::MovieAnalysis

pub mod analysis;
pub mod categories;
pub mod markdown;

pub use analysis::{extract_analysis, Section};
pub use categories::{is_category_header, CATEGORY_HEADERS};
pub use markdown::clean_markdown;
