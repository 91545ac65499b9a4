//! Genre grouping and type-ahead suggestions.

use std::collections::{HashMap, HashSet};

use crate::types::{EntryResults, GenreGroup, Prediction, TmdbMovie};

pub const UNKNOWN_GENRE: &str = "Unknown";

/// Fan every movie out into each genre it lists.
///
/// A movie appears in several groups when it has several genres, but at
/// most once per group. Groups keep first-seen order; movies with no
/// genres (or only unmapped ids) go to `"Unknown"`.
pub fn group_by_genre(results: &[EntryResults], genres: &HashMap<i64, String>) -> Vec<GenreGroup> {
    let mut groups: Vec<GenreGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut members: Vec<HashSet<i64>> = Vec::new();

    let movies = results.iter().flat_map(|r| r.movies.iter());
    for movie in movies {
        for genre in genre_names(movie, genres) {
            let slot = *index.entry(genre.clone()).or_insert_with(|| {
                groups.push(GenreGroup {
                    genre,
                    movies: Vec::new(),
                });
                members.push(HashSet::new());
                groups.len() - 1
            });
            if members[slot].insert(movie.id) {
                groups[slot].movies.push(movie.clone());
            }
        }
    }
    groups
}

fn genre_names(movie: &TmdbMovie, genres: &HashMap<i64, String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for id in &movie.genre_ids {
        let name = genres.get(id).cloned().unwrap_or_else(|| UNKNOWN_GENRE.to_string());
        if !names.contains(&name) {
            names.push(name);
        }
    }
    if names.is_empty() {
        names.push(UNKNOWN_GENRE.to_string());
    }
    names
}

/// First `limit` movies as `{id, title}` suggestions.
pub fn predictions(movies: &[TmdbMovie], limit: usize) -> Vec<Prediction> {
    movies
        .iter()
        .take(limit)
        .map(|m| Prediction {
            id: m.id,
            title: m.title.clone(),
        })
        .collect()
}
