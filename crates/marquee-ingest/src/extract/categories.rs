//! Catalog category headings that leak into generated tag lists.

/// Category headers that are never valid tags.
pub const CATEGORY_HEADERS: [&str; 10] = [
    "Coming of Age & First Love",
    "Historical & Period Dramas",
    "Age Gaps & Power Imbalances",
    "Supernatural & Sci-Fi Sapphics",
    "Religious Struggles & Conversion",
    "Family-Friendly",
    "Horror & Survival Thrillers",
    "Mainstream WLW",
    "Tragic & Doomed Romance",
    "Happy & Healthy WLW",
];

/// True when `line` equals or contains any category header.
pub fn is_category_header(line: &str) -> bool {
    CATEGORY_HEADERS.iter().any(|header| line.contains(header))
}
