use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use nt_core::SummaryResults;
use tracing::info;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

pub async fn health() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "News summary API is up and running.".to_string(),
    })
}

/// Crawls the top sports stories and summarizes them concurrently.
pub async fn summarize_top3_sport_news(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SummaryResults>, ApiError> {
    info!("🦗 Crawl requested");
    let results = state.manager.summarize_top().await?;
    info!("📦 Returning {} summarized articles", results.len());
    Ok(Json(SummaryResults { results }))
}
