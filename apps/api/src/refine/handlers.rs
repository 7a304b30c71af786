//! Axum route handlers for the Role Refinement API.
//!
//! The conversational state lives client-side (the sequencer in
//! `refine::sequencer` is the reference model of that flow); these
//! endpoints are its three stateless collaborator calls.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::refine::roles::{
    ask_clarifying_question, refine_role, suggest_role, ClarifyingQuestion, RoleSuggestion,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestRoleRequest {
    pub need: String,
}

#[derive(Debug, Deserialize)]
pub struct ClarifyRequest {
    pub need: String,
    pub rejected_title: String,
}

#[derive(Debug, Deserialize)]
pub struct RefineRoleRequest {
    pub need: String,
    pub rejected_title: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct RoleSuggestionResponse {
    pub suggestion: RoleSuggestion,
}

#[derive(Debug, Serialize)]
pub struct ClarifyResponse {
    pub question: String,
}

/// POST /api/v1/roles/suggest
///
/// Turns a free-text hiring need into an initial role suggestion.
pub async fn handle_suggest_role(
    State(state): State<AppState>,
    Json(request): Json<SuggestRoleRequest>,
) -> Result<Json<RoleSuggestionResponse>, AppError> {
    if request.need.trim().is_empty() {
        return Err(AppError::Validation("need cannot be empty".to_string()));
    }

    let suggestion = suggest_role(&request.need, &state.llm).await?;

    Ok(Json(RoleSuggestionResponse { suggestion }))
}

/// POST /api/v1/roles/clarify
///
/// Asks one clarifying question after the client rejects a suggestion.
pub async fn handle_clarify(
    State(state): State<AppState>,
    Json(request): Json<ClarifyRequest>,
) -> Result<Json<ClarifyResponse>, AppError> {
    if request.need.trim().is_empty() {
        return Err(AppError::Validation("need cannot be empty".to_string()));
    }
    if request.rejected_title.trim().is_empty() {
        return Err(AppError::Validation(
            "rejected_title cannot be empty".to_string(),
        ));
    }

    let ClarifyingQuestion { question } =
        ask_clarifying_question(&request.need, &request.rejected_title, &state.llm).await?;

    Ok(Json(ClarifyResponse { question }))
}

/// POST /api/v1/roles/refine
///
/// Produces a refined suggestion from the clarifying-question answer.
pub async fn handle_refine_role(
    State(state): State<AppState>,
    Json(request): Json<RefineRoleRequest>,
) -> Result<Json<RoleSuggestionResponse>, AppError> {
    if request.need.trim().is_empty() {
        return Err(AppError::Validation("need cannot be empty".to_string()));
    }
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }

    let suggestion = refine_role(
        &request.need,
        &request.rejected_title,
        &request.answer,
        &state.llm,
    )
    .await?;

    Ok(Json(RoleSuggestionResponse { suggestion }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_suggest_rejects_empty_need() {
        let err = handle_suggest_role(
            State(test_state()),
            Json(SuggestRoleRequest {
                need: "  ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_clarify_rejects_empty_need() {
        let err = handle_clarify(
            State(test_state()),
            Json(ClarifyRequest {
                need: String::new(),
                rejected_title: "Web Designer".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_clarify_rejects_empty_rejected_title() {
        let err = handle_clarify(
            State(test_state()),
            Json(ClarifyRequest {
                need: "I need a web shop".to_string(),
                rejected_title: " ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_refine_rejects_empty_need() {
        let err = handle_refine_role(
            State(test_state()),
            Json(RefineRoleRequest {
                need: String::new(),
                rejected_title: "Web Designer".to_string(),
                answer: "code".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_refine_rejects_empty_answer() {
        let err = handle_refine_role(
            State(test_state()),
            Json(RefineRoleRequest {
                need: "I need a web shop".to_string(),
                rejected_title: "Web Designer".to_string(),
                answer: "  ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
