//! Comment endpoints.

use axum::{Json, Router, extract::State, routing::post};
use guardmogo_common::AppResult;
use guardmogo_core::comment::CreateCommentInput;
use guardmogo_db::entities::comment;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    rate_limit::{RateLimiterState, rate_limit_middleware, rate_limit_write_middleware},
    response::ApiResponse,
};

/// Default page size for comment listings.
const DEFAULT_LIMIT: u64 = 50;
/// Maximum page size for comment listings.
const MAX_LIMIT: u64 = 100;

/// Comment response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub report_id: String,
    pub user_id: String,
    pub text: String,
    pub created_at: String,
}

impl From<comment::Model> for CommentResponse {
    fn from(comment: comment::Model) -> Self {
        Self {
            id: comment.id,
            report_id: comment.report_id,
            user_id: comment.user_id,
            text: comment.text,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

/// Add a comment to a report.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.create(&user.id, input).await?;

    Ok(ApiResponse::ok(comment.into()))
}

/// List request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsRequest {
    pub report_id: String,
    pub limit: Option<u64>,
}

/// List comments on a report (newest first).
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListCommentsRequest>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let limit = req.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let comments = state.comment_service.list(&req.report_id, limit).await?;

    Ok(ApiResponse::ok(
        comments.into_iter().map(Into::into).collect(),
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
        .layer(axum::middleware::from_fn_with_state(
            limiter.clone(),
            rate_limit_middleware,
        ));

    write_routes.merge(read_routes)
}
