//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use guardmogo_core::{CommentService, DashboardService, NumberService, ReportService, UserService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub report_service: ReportService,
    pub number_service: NumberService,
    pub dashboard_service: DashboardService,
    pub comment_service: CommentService,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to a user and stashes the user model in request
/// extensions. Requests without a valid token pass through unauthenticated;
/// endpoints that need a user reject them via the `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.user_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
