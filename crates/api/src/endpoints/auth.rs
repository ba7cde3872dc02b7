//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::post};
use guardmogo_common::AppResult;
use guardmogo_core::user::{SigninInput, SignupInput};
use guardmogo_db::entities::user;
use serde::Serialize;

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    rate_limit::{
        RateLimiterState, rate_limit_auth_middleware, rate_limit_middleware,
        rate_limit_signup_middleware,
    },
    response::ApiResponse,
};

/// User response (never exposes the password hash).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub reports_count: i32,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            first_name: user.first_name,
            last_name: user.last_name,
            role: match user.role {
                user::Role::Guest => "guest".to_string(),
                user::Role::User => "user".to_string(),
                user::Role::Admin => "admin".to_string(),
            },
            reports_count: user.reports_count,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Session response: the user plus their bearer token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
}

/// Create a new account.
async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let (user, token) = state.user_service.signup(input).await?;

    Ok(ApiResponse::ok(SessionResponse {
        user: user.into(),
        token,
    }))
}

/// Sign in to an existing account.
async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninInput>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let (user, token) = state.user_service.signin(input).await?;

    Ok(ApiResponse::ok(SessionResponse {
        user: user.into(),
        token,
    }))
}

/// Signout response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignoutResponse {
    pub ok: bool,
}

/// Sign out (invalidate the current token by rotating it).
async fn signout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<SignoutResponse>> {
    state.user_service.signout(&user.id).await?;

    Ok(ApiResponse::ok(SignoutResponse { ok: true }))
}

/// Current session introspection.
async fn i(AuthUser(user): AuthUser) -> ApiResponse<UserResponse> {
    ApiResponse::ok(user.into())
}

pub fn router(limiter: &RateLimiterState) -> Router<AppState> {
    let signup_routes = Router::new()
        .route("/signup", post(signup))
        .layer(axum::middleware::from_fn_with_state(
            limiter.clone(),
            rate_limit_signup_middleware,
        ));

    let signin_routes = Router::new()
        .route("/signin", post(signin))
        .layer(axum::middleware::from_fn_with_state(
            limiter.clone(),
            rate_limit_auth_middleware,
        ));

    let session_routes = Router::new()
        .route("/signout", post(signout))
        .route("/i", post(i))
        .layer(axum::middleware::from_fn_with_state(
            limiter.clone(),
            rate_limit_middleware,
        ));

    signup_routes.merge(signin_routes).merge(session_routes)
}
