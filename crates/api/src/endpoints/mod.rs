//! API endpoints.

mod auth;
mod comments;
mod dashboard;
mod meta;
mod numbers;
mod reports;

use axum::Router;

use crate::middleware::AppState;
use crate::rate_limit::RateLimiterState;

/// Create the API router.
///
/// Each sub-router attaches its own rate limit tier; auth endpoints are
/// throttled far harder than reads.
pub fn router() -> Router<AppState> {
    let limiter = RateLimiterState::new();
    limiter.spawn_cleanup();

    Router::new()
        .merge(auth::router(&limiter))
        .nest("/reports", reports::router(&limiter))
        .nest("/numbers", numbers::router(&limiter))
        .nest("/dashboard", dashboard::router(&limiter))
        .nest("/comments", comments::router(&limiter))
        .nest("/meta", meta::router(&limiter))
}
