//! Meta endpoints.

use axum::{Json, Router, routing::post};
use serde::Serialize;

use crate::{
    middleware::AppState,
    rate_limit::{RateLimiterState, rate_limit_middleware},
};

/// Service metadata response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub carriers: Vec<&'static str>,
    pub safety_tips: Vec<SafetyTip>,
}

/// A safety tip shown on the educational page.
#[derive(Serialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct SafetyTip {
    pub title: &'static str,
    pub body: &'static str,
}

const SAFETY_TIPS: &[SafetyTip] = &[
    SafetyTip {
        title: "Never share your MoMo PIN",
        body: "No carrier or bank will ever ask for your PIN by phone or SMS. Anyone who does is trying to steal from you.",
    },
    SafetyTip {
        title: "Be wary of prize and promotion calls",
        body: "If you did not enter a promotion, you did not win one. Callers asking for a fee to release a prize are scammers.",
    },
    SafetyTip {
        title: "Verify before you send",
        body: "Check an unfamiliar number here before sending money. Confirm requests from friends or family through a second channel.",
    },
    SafetyTip {
        title: "Ignore wrong-transfer reversal requests",
        body: "A common trick is a fake deposit alert followed by a tearful call asking you to send the money back. Check your actual balance first.",
    },
    SafetyTip {
        title: "Report fraud attempts",
        body: "Reporting a fraudulent number here warns the next person who checks it, even if you did not lose money.",
    },
];

/// Get service metadata and safety tips.
async fn meta() -> Json<MetaResponse> {
    Json(MetaResponse {
        name: "GuardMoGo".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Community fraud reporting for Ghanaian Mobile Money numbers".to_string(),
        carriers: vec!["MTN", "AirtelTigo", "Telecel", "Other"],
        safety_tips: SAFETY_TIPS.to_vec(),
    })
}

pub fn router(limiter: &RateLimiterState) -> Router<AppState> {
    Router::new()
        .route("/", post(meta))
        .layer(axum::middleware::from_fn_with_state(
            limiter.clone(),
            rate_limit_middleware,
        ))
}
