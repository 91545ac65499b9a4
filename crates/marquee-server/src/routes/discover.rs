//! Browse view: a random catalog sample resolved against TMDB and grouped
//! by genre.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use marquee_ingest::sample;
use marquee_metadata::group_by_genre;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/discover", get(discover))
}

async fn discover(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let Some(catalog) = state.catalog.as_deref() else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Movie list file not found" })),
        );
    };
    let tmdb = match state.tmdb() {
        Ok(tmdb) => tmdb,
        Err(e) => return error_response(&e, "Failed to load movies"),
    };

    let genres = match state.genres().await {
        Ok(genres) => genres,
        Err(e) => {
            warn!("Genre list unavailable, grouping as Unknown: {}", e);
            Arc::new(HashMap::new())
        }
    };

    let picked = sample(catalog, state.config.sample_size);
    let results = tmdb.search_entries(&picked).await;
    let result_count: usize = results.iter().map(|r| r.movies.len()).sum();
    let groups = group_by_genre(&results, &genres);

    info!(
        "Discover: {} entries, {} movies, {} genres",
        picked.len(),
        result_count,
        groups.len()
    );

    (
        StatusCode::OK,
        Json(json!({
            "resultCount": result_count,
            "groups": groups,
        })),
    )
}
