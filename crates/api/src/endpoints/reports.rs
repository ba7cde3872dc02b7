//! Report endpoints.

use axum::{Json, Router, extract::State, routing::post};
use guardmogo_common::AppResult;
use guardmogo_core::report::CreateReportInput;
use guardmogo_db::entities::report;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    rate_limit::{RateLimiterState, rate_limit_middleware, rate_limit_write_middleware},
    response::ApiResponse,
};

/// Default page size for report listings.
const DEFAULT_LIMIT: u64 = 50;
/// Maximum page size for report listings.
const MAX_LIMIT: u64 = 100;

/// Report response.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub number: String,
    pub carrier: String,
    pub fraud_type: String,
    pub category: String,
    pub description: String,
    pub user_id: String,
    pub status: String,
    pub verified: bool,
    pub comments_count: i32,
    pub created_at: String,
}

impl From<report::Model> for ReportResponse {
    fn from(report: report::Model) -> Self {
        Self {
            id: report.id,
            number: report.number,
            carrier: report.carrier,
            fraud_type: report.fraud_type,
            category: report.category,
            description: report.description,
            user_id: report.user_id,
            status: match report.status {
                report::ReportStatus::Active => "active".to_string(),
            },
            verified: report.verified,
            comments_count: report.comments_count,
            created_at: report.created_at.to_rfc3339(),
        }
    }
}

/// Submit a fraud report.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReportInput>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state.report_service.create(&user.id, input).await?;

    Ok(ApiResponse::ok(report.into()))
}

/// List request (pagination).
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListReportsRequest {
    pub limit: Option<u64>,
    pub until_id: Option<String>,
}

/// List recent reports (newest first).
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListReportsRequest>,
) -> AppResult<ApiResponse<Vec<ReportResponse>>> {
    let limit = req.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let reports = state
        .report_service
        .list_recent(limit, req.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        reports.into_iter().map(Into::into).collect(),
    ))
}

/// Show request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowReportRequest {
    pub report_id: String,
}

/// Get a single report by ID.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowReportRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state.report_service.get(&req.report_id).await?;

    Ok(ApiResponse::ok(report.into()))
}

/// List the authenticated user's reports (newest first).
async fn mine(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListReportsRequest>,
) -> AppResult<ApiResponse<Vec<ReportResponse>>> {
    let limit = req.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let reports = state
        .report_service
        .list_by_user(&user.id, limit, req.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        reports.into_iter().map(Into::into).collect(),
    ))
}

pub fn router(limiter: &RateLimiterState) -> Router<AppState> {
    let write_routes = Router::new()
        .route("/create", post(create))
        .layer(axum::middleware::from_fn_with_state(
            limiter.clone(),
            rate_limit_write_middleware,
        ));

    let read_routes = Router::new()
        .route("/list", post(list))
        .route("/show", post(show))
        .route("/mine", post(mine))
        .layer(axum::middleware::from_fn_with_state(
            limiter.clone(),
            rate_limit_middleware,
        ));

    write_routes.merge(read_routes)
}
