//! Axum route handlers for candidate ingestion.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::candidates::store::upsert_candidate;
use crate::errors::AppError;
use crate::matching::embedding::encode_embedding;
use crate::models::candidate::RawProfile;
use crate::scoring::{compute_scores, Scores};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub username: String,
    pub scores: Scores,
    pub embedded: bool,
}

/// POST /api/v1/candidates
///
/// Ingests one scraped profile: normalize → score → embed → upsert.
/// Scores are recomputed on every (re)ingestion of the same username.
pub async fn handle_ingest(
    State(state): State<AppState>,
    Json(raw): Json<RawProfile>,
) -> Result<Json<IngestResponse>, AppError> {
    if raw.username.trim().is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }

    let profile = raw.normalize();
    let scores = compute_scores(&profile, &state.scoring);

    // A profile with no usable text is stored without an embedding; the
    // selector will skip it rather than match against noise.
    let text = profile.embedding_text();
    let embedding = if text.is_empty() {
        warn!(
            "Candidate '{}' has no embeddable text, storing without embedding",
            profile.username
        );
        None
    } else {
        let vector = state
            .embedder
            .embed(&text)
            .await
            .map_err(|e| AppError::Embedding(e.to_string()))?;
        Some(encode_embedding(&vector))
    };

    upsert_candidate(&state.db, &profile, scores, embedding.as_deref()).await?;

    Ok(Json(IngestResponse {
        username: profile.username,
        scores,
        embedded: embedding.is_some(),
    }))
}
