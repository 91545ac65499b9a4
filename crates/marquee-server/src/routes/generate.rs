//! Generated synopsis and structured analysis routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use marquee_core::{Error, Result};
use marquee_generate::providers;
use marquee_generate::{GenerateRequest, PromptTemplate, SynopsisResponse};
use marquee_ingest::{clean_markdown, extract_analysis};
use serde_json::{json, Value};
use tracing::info;

use super::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gemini", post(synopsis))
        .route("/gemini/status", get(status))
        .route("/analysis", post(analysis))
}

async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!(state.gemini_config.to_response()))
}

/// Validate the request and produce one cleaned document for `template`.
async fn generate_document(
    state: &AppState,
    req: &GenerateRequest,
    template: PromptTemplate,
) -> Result<String> {
    let (title, overview) = req.validate()?;
    if !state.gemini_config.is_configured() {
        return Err(Error::Config("Gemini API key is not configured".into()));
    }

    info!("Sending {:?} request to Gemini for {:?}", template, title);
    let prompt = template.render(title, overview);
    let document = providers::generate(&state.http, &state.gemini_config, &prompt).await?;
    Ok(clean_markdown(&document))
}

/// Generate with `template` and shape the body it calls for.
async fn respond(
    state: &AppState,
    req: &GenerateRequest,
    template: PromptTemplate,
    failure: &str,
) -> (StatusCode, Json<Value>) {
    let document = match generate_document(state, req, template).await {
        Ok(document) => document,
        Err(e) => return error_response(&e, failure),
    };

    let body = if template.is_structured() {
        json!(extract_analysis(&document))
    } else {
        json!(SynopsisResponse { synopsis: document })
    };
    (StatusCode::OK, Json(body))
}

async fn synopsis(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> (StatusCode, Json<Value>) {
    respond(&state, &req, PromptTemplate::Synopsis, "Failed to generate synopsis").await
}

async fn analysis(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> (StatusCode, Json<Value>) {
    respond(&state, &req, PromptTemplate::Analysis, "Failed to generate analysis").await
}
