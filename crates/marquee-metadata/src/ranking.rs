//! Candidate ranking against a catalog entry.

use std::cmp::Reverse;

use chrono::{Datelike, NaiveDate};

use crate::types::TmdbMovie;

/// Release year from a TMDB `YYYY-MM-DD` date.
pub fn release_year(release_date: Option<&str>) -> Option<i32> {
    let date = release_date?.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }
    // Partial dates ("2021", "2021-05") still carry a usable year.
    date.get(..4).and_then(|y| y.parse().ok())
}

/// Order candidates: exact title match first, then matching release year
/// (when `year` is given), then descending vote count. Stable otherwise.
pub fn rank_candidates(mut candidates: Vec<TmdbMovie>, title: &str, year: Option<&str>) -> Vec<TmdbMovie> {
    let wanted_title = title.trim().to_lowercase();
    let wanted_year: Option<i32> = year.and_then(|y| y.trim().parse().ok());

    candidates.sort_by_key(|movie| {
        let exact = movie.title.trim().to_lowercase() == wanted_title;
        let same_year = wanted_year.is_some()
            && release_year(movie.release_date.as_deref()) == wanted_year;
        (!exact, !same_year, Reverse(movie.vote_count))
    });
    candidates
}
