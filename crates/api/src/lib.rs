//! HTTP API layer for GuardMoGo.
//!
//! - **Endpoints**: report submission, number lookup, dashboard, comments,
//!   auth
//! - **Extractors**: bearer-token authentication
//! - **Middleware**: auth, rate limiting
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod rate_limit;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
pub use rate_limit::{ApiRateLimiter, RateLimitConfig, RateLimiterState};
