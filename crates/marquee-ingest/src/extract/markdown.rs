//! Markdown cleanup for generated text.

use once_cell::sync::Lazy;
use regex::Regex;

static BANNER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:#{1,6}[ \t]*)?\**[ \t]*AI-Generated Synopsis[ \t]*\**[ \t]*:?[ \t]*(?:\r?\n|$)")
        .unwrap()
});
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static STRAY_AFTER_SYNOPSIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Synopsis:?)\*+[ \t]*").unwrap());
static LEADING_ASTERISKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*\*+[ \t]*").unwrap());

/// Strip markdown markup from generated text.
///
/// Removes the `AI-Generated Synopsis` banner when it opens the text,
/// heading markers, emphasis wrappers and leftover leading asterisks. A
/// stray marker glued to the `Synopsis` label becomes a line break.
pub fn clean_markdown(text: &str) -> String {
    let text = BANNER.replace(text, "");
    let text = HEADING.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = STRAY_AFTER_SYNOPSIS.replace_all(&text, "$1\n");
    LEADING_ASTERISKS.replace_all(&text, "").into_owned()
}
