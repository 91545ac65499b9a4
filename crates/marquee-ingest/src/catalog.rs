//! Catalog entry parsing.
//!
//! The catalog is a loosely formatted list with one film per line, in one of
//! the forms `Title, Country (Year)`, `Title (Year)` or a bare `Title`,
//! interleaved with alphabet headers, range markers and its own title line.

use marquee_core::CatalogEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Title line of the bundled catalog; any line containing it is skipped.
pub const DEFAULT_SELF_TITLE: &str = "List of LGBTQ";

static SINGLE_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]$").unwrap());
static RANGE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9][–-][0-9]$").unwrap());
static TRAILING_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([0-9]{4})\)$").unwrap());
static ANY_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").unwrap());
/// Everything from the first `, ` up to a trailing year is the country clause.
static COUNTRY_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r", [^(]+ \([0-9]{4}\)$").unwrap());
static SPACE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r" \([0-9]{4}\)$").unwrap());

/// Line-oriented catalog parser.
#[derive(Debug, Clone)]
pub struct CatalogParser {
    self_title: String,
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self::new(DEFAULT_SELF_TITLE)
    }
}

impl CatalogParser {
    /// Create a parser that skips lines containing `self_title`.
    pub fn new(self_title: impl Into<String>) -> Self {
        Self {
            self_title: self_title.into(),
        }
    }

    /// Parse the full catalog text, preserving line order.
    pub fn parse(&self, content: &str) -> Vec<CatalogEntry> {
        let entries: Vec<CatalogEntry> = content
            .lines()
            .filter_map(|line| self.parse_line(line))
            .collect();
        debug!("Parsed {} catalog entries", entries.len());
        entries
    }

    /// Parse a single line; `None` for noise lines.
    pub fn parse_line(&self, line: &str) -> Option<CatalogEntry> {
        let line = line.trim();
        if self.is_noise(line) {
            return None;
        }

        let trailing_year = TRAILING_YEAR
            .captures(line)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str());
        let year = trailing_year.or_else(|| ANY_YEAR.find(line).map(|m| m.as_str()));

        let title = if let Some(m) = COUNTRY_YEAR.find(line) {
            &line[..m.start()]
        } else if let Some(m) = trailing_year.and_then(|_| SPACE_YEAR.find(line)) {
            &line[..m.start()]
        } else {
            line
        };

        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(CatalogEntry::new(title, year))
    }

    fn is_noise(&self, line: &str) -> bool {
        line.is_empty()
            || line.starts_with('#')
            || SINGLE_LETTER.is_match(line)
            || RANGE_MARKER.is_match(line)
            || (!self.self_title.is_empty() && line.contains(&self.self_title))
    }
}

/// Parse catalog text with the default parser.
pub fn parse_catalog(content: &str) -> Vec<CatalogEntry> {
    CatalogParser::default().parse(content)
}
