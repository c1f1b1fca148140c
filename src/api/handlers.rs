use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use super::dto::{AnalyzeRequest, HealthResponse, HEALTH_STATUS};
use super::error::ApiError;
use super::state::AppState;
use crate::domain::entities::analysis::AnalysisResult;
use crate::domain::entities::news_article::NewsArticle;

/// GET / - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS,
        models_loaded: state.finnews.models_loaded(),
    })
}

/// GET /fetch-news/:ticker - Live news for a ticker
pub async fn fetch_news(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<Vec<NewsArticle>>, ApiError> {
    let articles = state.finnews.fetch_news(&ticker).await?;
    Ok(Json(articles))
}

/// POST /analyze - Sentiment and summary for the given text
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(req) = payload?;
    let result = state.finnews.analyze(&req.text).await?;
    Ok(Json(result))
}
