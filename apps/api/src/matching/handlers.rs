//! Axum route handlers for the Match API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::candidates::store::fetch_all_candidates;
use crate::errors::AppError;
use crate::matching::select::select_best_match;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub query: String,
}

/// The winning candidate, trimmed for the response (no stored embedding).
#[derive(Debug, Serialize)]
pub struct MatchedCandidate {
    pub username: String,
    pub display_name: Option<String>,
    pub headline: Option<String>,
    pub skills: Vec<String>,
    pub rating: Option<f64>,
    pub competence_score: f64,
    pub agency_score: f64,
}

/// `best_match` is null when the candidate set is empty or no candidate
/// has a usable embedding. That outcome is deliberately NOT an error —
/// embedding-provider and store failures surface as error responses
/// instead, so callers can always tell the three cases apart.
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub best_match: Option<MatchedCandidate>,
    pub similarity: Option<f32>,
}

/// POST /api/v1/match
///
/// Embeds the query, fetches all candidates, and returns the single most
/// similar one. Two sequential awaits, then a synchronous linear scan.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    // Query-embedding failure is fatal to the whole search; there is no fallback.
    let query_embedding = state
        .embedder
        .embed(&request.query)
        .await
        .map_err(|e| AppError::Embedding(e.to_string()))?;

    let candidates = fetch_all_candidates(&state.db).await?;

    let best = select_best_match(&query_embedding, &candidates);

    Ok(Json(match best {
        Some(found) => MatchResponse {
            best_match: Some(MatchedCandidate {
                username: found.candidate.username.clone(),
                display_name: found.candidate.display_name.clone(),
                headline: found.candidate.headline.clone(),
                skills: found.candidate.skills.clone(),
                rating: found.candidate.rating,
                competence_score: found.candidate.competence_score,
                agency_score: found.candidate.agency_score,
            }),
            similarity: Some(found.similarity),
        },
        None => MatchResponse {
            best_match: None,
            similarity: None,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let err = handle_match(
            State(test_state()),
            Json(MatchRequest {
                query: String::new(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_whitespace_query_is_rejected() {
        let err = handle_match(
            State(test_state()),
            Json(MatchRequest {
                query: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
