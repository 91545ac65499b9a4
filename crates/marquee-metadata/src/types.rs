//! TMDB record types.

use std::collections::HashMap;

use marquee_core::CatalogEntry;
use serde::{Deserialize, Serialize};

/// One search candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

impl TmdbGenreList {
    pub fn into_map(self) -> HashMap<i64, String> {
        self.genres.into_iter().map(|g| (g.id, g.name)).collect()
    }
}

/// Ranked candidates for one catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryResults {
    pub entry: CatalogEntry,
    pub movies: Vec<TmdbMovie>,
}

/// Movies sharing one genre.
#[derive(Debug, Clone, Serialize)]
pub struct GenreGroup {
    pub genre: String,
    pub movies: Vec<TmdbMovie>,
}

/// Type-ahead suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub id: i64,
    pub title: String,
}
