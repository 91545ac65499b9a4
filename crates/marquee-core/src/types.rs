//! Records produced by the extraction pipeline.

use serde::{Deserialize, Serialize};

/// One parsed catalog line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Non-empty, trimmed title.
    pub title: String,
    /// Four-digit release year, when the line carried one.
    pub year: Option<String>,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, year: Option<&str>) -> Self {
        Self {
            title: title.into(),
            year: year.map(str::to_string),
        }
    }
}

/// Structured analysis extracted from one generated document.
///
/// Every field degrades to empty independently when its section is
/// missing from the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieAnalysis {
    pub title: String,
    pub release_date: String,
    pub synopsis: String,
    pub key_elements: Vec<String>,
    pub tropes_and_tags: Vec<String>,
    pub where_to_watch: Vec<String>,
}

impl MovieAnalysis {
    /// True when no field was populated.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.release_date.is_empty()
            && self.synopsis.is_empty()
            && self.key_elements.is_empty()
            && self.tropes_and_tags.is_empty()
            && self.where_to_watch.is_empty()
    }
}
