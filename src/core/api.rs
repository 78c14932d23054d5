//! HTTP API for Rapport
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /analyze - Full rule-based analysis of a message list
//! - POST /patterns - Batch pattern distribution only

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Thresholds;
use crate::core::report::{analyze_messages, AnalysisReport};
use crate::core::{BatchAnalyzer, MetricsAggregator, PatternClassifier};
use crate::types::{BatchPatternAnalysis, Conversation, NormalizedMessage};

/// App state
pub struct AppState {
    pub classifier: PatternClassifier,
}

/// Request body for analysis endpoints
#[derive(Debug, Deserialize)]
pub struct MessagesRequest {
    pub messages: Vec<NormalizedMessage>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create the API router
pub fn create_router(thresholds: Thresholds) -> Router {
    let state = Arc::new(AppState {
        classifier: PatternClassifier::with_thresholds(thresholds),
    });

    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/patterns", post(patterns))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Full analysis
async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MessagesRequest>,
) -> Json<AnalysisReport> {
    tracing::debug!(messages = req.messages.len(), "POST /analyze");
    Json(analyze_messages(&req.messages, &state.classifier))
}

/// Batch distribution only
async fn patterns(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MessagesRequest>,
) -> Json<BatchPatternAnalysis> {
    tracing::debug!(messages = req.messages.len(), "POST /patterns");
    let conversations = Conversation::group_by_match(&req.messages);
    let metrics = MetricsAggregator::new().all_conversation_metrics(&conversations);
    Json(BatchAnalyzer::with_classifier(state.classifier.clone()).analyze_batch_patterns(&metrics))
}

/// Run the API server
pub async fn run_server(addr: &str, thresholds: Thresholds) -> std::io::Result<()> {
    let router = create_router(thresholds);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "rapport API listening");
    println!("Rapport API running on {}", addr);
    println!("  GET  /health    - Health check");
    println!("  POST /analyze   - Full analysis");
    println!("  POST /patterns  - Pattern distribution");
    axum::serve(listener, router).await?;
    Ok(())
}
