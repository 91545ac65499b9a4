//! Catalog browsing and direct metadata routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use marquee_ingest::{filter_entries, sample};
use marquee_metadata::predictions as top_predictions;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::error_response;
use crate::state::AppState;

/// Suggestions shown while typing.
const PREDICTION_LIMIT: usize = 6;
const MIN_PREDICTION_QUERY: usize = 2;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/{id}", get(movie_details))
        .route("/search", get(search))
        .route("/predictions", get(predictions))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
}

impl SearchParams {
    fn trimmed(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

// ---------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------

async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<Value>) {
    let Some(catalog) = state.catalog.as_deref() else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Movie list file not found" })),
        );
    };

    let movies = match params.trimmed() {
        Some(query) => filter_entries(catalog, query),
        None => sample(catalog, state.config.sample_size),
    };
    debug!("Returning {} catalog entries", movies.len());

    (StatusCode::OK, Json(json!({ "movies": movies })))
}

// ---------------------------------------------------------------
// TMDB passthrough
// ---------------------------------------------------------------

async fn movie_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    let result = match state.tmdb() {
        Ok(tmdb) => tmdb.movie_details(id).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(details) => (StatusCode::OK, Json(details)),
        Err(e) => error_response(&e, "Failed to fetch movie details"),
    }
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<Value>) {
    let Some(query) = params.trimmed() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Query is required" })),
        );
    };

    let result = match state.tmdb() {
        Ok(tmdb) => tmdb.search_movie(query).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(movies) => (
            StatusCode::OK,
            Json(json!({ "resultCount": movies.len(), "movies": movies })),
        ),
        Err(e) => error_response(&e, "Search failed"),
    }
}

async fn predictions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    let query = match params.trimmed() {
        Some(q) if q.chars().count() >= MIN_PREDICTION_QUERY => q,
        _ => return Json(json!({ "predictions": [] })),
    };

    let result = match state.tmdb() {
        Ok(tmdb) => tmdb.search_movie(query).await,
        Err(e) => Err(e),
    };
    let suggestions = match result {
        Ok(movies) => top_predictions(&movies, PREDICTION_LIMIT),
        Err(e) => {
            warn!("Error fetching predictions: {}", e);
            Vec::new()
        }
    };

    Json(json!({ "predictions": suggestions }))
}
