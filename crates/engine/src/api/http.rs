//! HTTP routes.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use wayfarer_shared::{CronResponse, ErrorResponse, HistoryResponse};

use crate::app::App;
use crate::use_cases::HistoryError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/cron/daily-update", get(daily_update))
        .route("/api/history", get(list_history))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Cron
// =============================================================================

async fn daily_update(State(app): State<Arc<App>>, headers: HeaderMap) -> Response {
    if let Some(secret) = app.cron_secret.as_deref() {
        if !bearer_matches(&headers, secret) {
            tracing::warn!("Rejected daily update without valid cron secret");
            return (
                StatusCode::UNAUTHORIZED,
                Json(CronResponse::aborted("Unauthorized")),
            )
                .into_response();
        }
    }

    match app.use_cases.simulation.daily_update.execute().await {
        Ok(outcome) => {
            let status = if outcome.success {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(CronResponse::from_outcome(outcome))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(CronResponse::aborted(e.to_string())),
        )
            .into_response(),
    }
}

fn bearer_matches(headers: &HeaderMap, secret: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token.trim() == secret)
}

// =============================================================================
// History
// =============================================================================

#[derive(Debug, Deserialize)]
struct HistoryParams {
    limit: Option<String>,
}

async fn list_history(
    State(app): State<Arc<App>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = app
        .use_cases
        .history
        .list_recent
        .execute(params.limit.as_deref())
        .await?;
    Ok(Json(HistoryResponse { history }))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(msg))).into_response()
            }
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(e: HistoryError) -> Self {
        match e {
            HistoryError::InvalidLimit(_) => ApiError::BadRequest(e.to_string()),
            HistoryError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}
