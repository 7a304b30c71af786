mod candidates;
mod config;
mod db;
mod embedding;
mod errors;
mod llm_client;
mod matching;
mod models;
mod refine;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::embedding::OpenAiEmbedder;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scoring::ScoringConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talent Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize embedding provider
    let embedder = Arc::new(OpenAiEmbedder::new(config.openai_api_key.clone()));
    info!(
        "Embedding client initialized (model: {})",
        embedding::EMBEDDING_MODEL
    );

    // Scoring saturation constants, overridable from env
    let scoring = ScoringConfig::from_config(&config);
    info!(
        "Scoring config: review saturation {}, project saturation {}",
        scoring.review_saturation, scoring.project_saturation
    );

    // Build app state
    let state = AppState {
        db,
        llm,
        embedder,
        config: config.clone(),
        scoring,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
