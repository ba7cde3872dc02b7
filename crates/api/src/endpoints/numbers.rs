//! Number lookup endpoints.

use axum::{Json, Router, extract::State, routing::post};
use guardmogo_common::AppResult;
use guardmogo_db::entities::number_record;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::reports::ReportResponse,
    middleware::AppState,
    rate_limit::{RateLimiterState, rate_limit_middleware},
    response::ApiResponse,
};

/// Default number of top entries returned.
const DEFAULT_TOP_LIMIT: u64 = 10;
/// Maximum number of top entries returned.
const MAX_TOP_LIMIT: u64 = 50;

/// Number record response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberRecordResponse {
    pub number: String,
    pub reports_count: i32,
    pub first_reported_at: String,
    pub last_reported_at: String,
    pub flagged: bool,
    pub verified: bool,
}

impl From<number_record::Model> for NumberRecordResponse {
    fn from(record: number_record::Model) -> Self {
        Self {
            number: record.number,
            reports_count: record.reports_count,
            first_reported_at: record.first_reported_at.to_rfc3339(),
            last_reported_at: record.last_reported_at.to_rfc3339(),
            flagged: record.flagged,
            verified: record.verified,
        }
    }
}

/// Check request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNumberRequest {
    pub number: String,
}

/// Check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNumberResponse {
    pub number: String,
    pub found: bool,
    pub flagged: bool,
    pub verified: bool,
    pub reports_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_reported_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reported_at: Option<String>,
    pub reports: Vec<ReportResponse>,
}

/// Look up a number.
async fn check(
    State(state): State<AppState>,
    Json(req): Json<CheckNumberRequest>,
) -> AppResult<ApiResponse<CheckNumberResponse>> {
    let result = state.number_service.check(&req.number).await?;

    Ok(ApiResponse::ok(CheckNumberResponse {
        number: result.number,
        found: result.found,
        flagged: result.flagged,
        verified: result.verified,
        reports_count: result.reports_count,
        first_reported_at: result.first_reported_at.map(|dt| dt.to_rfc3339()),
        last_reported_at: result.last_reported_at.map(|dt| dt.to_rfc3339()),
        reports: result.reports.into_iter().map(Into::into).collect(),
    }))
}

/// Top request.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TopNumbersRequest {
    pub limit: Option<u64>,
}

/// Most reported numbers.
async fn top(
    State(state): State<AppState>,
    Json(req): Json<TopNumbersRequest>,
) -> AppResult<ApiResponse<Vec<NumberRecordResponse>>> {
    let limit = req.limit.unwrap_or(DEFAULT_TOP_LIMIT).min(MAX_TOP_LIMIT);
    let records = state.number_service.top(limit).await?;

    Ok(ApiResponse::ok(
        records.into_iter().map(Into::into).collect(),
    ))
}

pub fn router(limiter: &RateLimiterState) -> Router<AppState> {
    Router::new()
        .route("/check", post(check))
        .route("/top", post(top))
        .layer(axum::middleware::from_fn_with_state(
            limiter.clone(),
            rate_limit_middleware,
        ))
}
