pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidate_handlers;
use crate::matching::handlers as match_handlers;
use crate::refine::handlers as refine_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/match", post(match_handlers::handle_match))
        // Candidate ingestion
        .route(
            "/api/v1/candidates",
            post(candidate_handlers::handle_ingest),
        )
        // Role Refinement API
        .route(
            "/api/v1/roles/suggest",
            post(refine_handlers::handle_suggest_role),
        )
        .route(
            "/api/v1/roles/clarify",
            post(refine_handlers::handle_clarify),
        )
        .route(
            "/api/v1/roles/refine",
            post(refine_handlers::handle_refine_role),
        )
        .with_state(state)
}
