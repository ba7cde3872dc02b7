//! Dashboard endpoints.

use axum::{Router, extract::State, routing::post};
use guardmogo_common::AppResult;
use serde::Serialize;

use crate::{
    endpoints::numbers::NumberRecordResponse,
    middleware::AppState,
    rate_limit::{RateLimiterState, rate_limit_middleware},
    response::ApiResponse,
};

/// Dashboard statistics response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_reports: u64,
    pub total_numbers: u64,
    pub active_reports: u64,
    pub top_numbers: Vec<NumberRecordResponse>,
}

/// Get dashboard statistics.
async fn stats(State(state): State<AppState>) -> AppResult<ApiResponse<DashboardStatsResponse>> {
    let stats = state.dashboard_service.stats().await?;

    Ok(ApiResponse::ok(DashboardStatsResponse {
        total_reports: stats.total_reports,
        total_numbers: stats.total_numbers,
        active_reports: stats.active_reports,
        top_numbers: stats.top_numbers.into_iter().map(Into::into).collect(),
    }))
}

pub fn router(limiter: &RateLimiterState) -> Router<AppState> {
    Router::new()
        .route("/stats", post(stats))
        .layer(axum::middleware::from_fn_with_state(
            limiter.clone(),
            rate_limit_middleware,
        ))
}
