//! HTTP route handlers.

pub mod discover;
pub mod generate;
pub mod movies;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use marquee_core::Error;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(movies::routes())
        .merge(discover::routes())
        .merge(generate::routes())
}

/// Map an error to a JSON error response.
///
/// Client and configuration errors carry their own message; everything
/// else reports `message` with the error as `details`.
pub(crate) fn error_response(err: &Error, message: &str) -> (StatusCode, Json<Value>) {
    match err {
        Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))),
        Error::Config(msg) => {
            error!("{}", msg);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": msg })))
        }
        Error::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": message, "details": err.to_string() })),
        ),
        _ => {
            error!("{}: {}", message, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message, "details": err.to_string() })),
            )
        }
    }
}
