//! Section extraction from a generated analysis document.
//!
//! Expected layout (loosely followed by the generator):
//!
//! ```text
//! <title>
//! <release date>
//!
//! Synopsis
//!
//! <free text>
//!
//! Key Elements
//!
//! <one item per line>
//!
//! Tropes & Tags
//!
//! <one tag per line>
//!
//! Where to Watch
//!
//! <one platform per line>
//! ⚠️ <availability warning>
//! ```
//!
//! The document is walked once, line by line. Anchor lines switch the
//! current section; everything else is appended to it.

use marquee_core::MovieAnalysis;
use tracing::debug;

use super::categories::is_category_header;

/// Leading characters that mark a bullet line. Bullet lines are template
/// scaffolding, not content.
const BULLET_MARKERS: [char; 6] = ['•', '●', '▪', '◦', '-', '*'];

/// Closes the document; nothing after it is extracted.
const WARNING_MARKER: char = '⚠';

/// Named body sections of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Synopsis,
    KeyElements,
    TropesAndTags,
    WhereToWatch,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Synopsis,
        Section::KeyElements,
        Section::TropesAndTags,
        Section::WhereToWatch,
    ];

    /// Canonical anchor text.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Synopsis => "Synopsis",
            Section::KeyElements => "Key Elements",
            Section::TropesAndTags => "Tropes & Tags",
            Section::WhereToWatch => "Where to Watch",
        }
    }

    /// Recognize an anchor line, tolerating markdown wrappers, a trailing
    /// colon and letter case.
    pub fn from_anchor(line: &str) -> Option<Section> {
        let label = line
            .trim()
            .trim_matches(|c: char| c == '#' || c == '*' || c.is_whitespace())
            .trim_end_matches(':')
            .trim()
            .to_lowercase();
        match label.as_str() {
            "synopsis" => Some(Section::Synopsis),
            "key elements" => Some(Section::KeyElements),
            "tropes & tags" | "tropes and tags" => Some(Section::TropesAndTags),
            "where to watch" => Some(Section::WhereToWatch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    SeekingSection,
    InSynopsis,
    InKeyElements,
    InTropes,
    InWhereToWatch,
    Done,
}

impl From<Section> for State {
    fn from(section: Section) -> Self {
        match section {
            Section::Synopsis => State::InSynopsis,
            Section::KeyElements => State::InKeyElements,
            Section::TropesAndTags => State::InTropes,
            Section::WhereToWatch => State::InWhereToWatch,
        }
    }
}

/// Extract a [`MovieAnalysis`] from one generated document.
///
/// Total over its input: malformed documents produce partially or fully
/// empty records.
pub fn extract_analysis(text: &str) -> MovieAnalysis {
    let mut analysis = MovieAnalysis::default();
    let mut header: Vec<&str> = Vec::with_capacity(2);
    let mut synopsis: Vec<&str> = Vec::new();
    let mut state = State::Header;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with(WARNING_MARKER) {
            state = State::Done;
        }
        if state == State::Done {
            break;
        }

        if let Some(section) = Section::from_anchor(trimmed) {
            state = section.into();
            continue;
        }

        match state {
            State::Header => {
                header.push(trimmed);
                if header.len() == 2 {
                    state = State::SeekingSection;
                }
            }
            State::SeekingSection | State::Done => {}
            State::InSynopsis => synopsis.push(line),
            State::InKeyElements => push_item(&mut analysis.key_elements, trimmed),
            State::InTropes => {
                if !is_category_header(trimmed) {
                    push_item(&mut analysis.tropes_and_tags, trimmed);
                }
            }
            State::InWhereToWatch => push_item(&mut analysis.where_to_watch, trimmed),
        }
    }

    if let [title, release_date] = header.as_slice() {
        analysis.title = title.to_string();
        analysis.release_date = release_date.to_string();
    }
    analysis.synopsis = synopsis.join("\n").trim().to_string();

    debug!(
        "Extracted analysis: title={:?} key_elements={} tags={} platforms={}",
        analysis.title,
        analysis.key_elements.len(),
        analysis.tropes_and_tags.len(),
        analysis.where_to_watch.len()
    );
    analysis
}

fn push_item(items: &mut Vec<String>, line: &str) {
    if line.is_empty() || line.starts_with(BULLET_MARKERS) {
        return;
    }
    items.push(line.to_string());
}
