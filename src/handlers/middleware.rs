use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ProxyError;
use crate::models::AppState;
use super::helpers::client_ip;

pub const PROXY_SECRET_HEADER: &str = "x-proxy-secret";

const RESET_LIMIT_MESSAGE: &str =
    "Too many password reset requests from this IP, please try again later.";

/// Reject requests whose `x-proxy-secret` does not match the configured
/// secret. With no secret configured nothing gets through.
pub async fn require_proxy_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(PROXY_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());
    let authorized = match (state.proxy_secret.as_deref(), presented) {
        (Some(expected), Some(got)) => expected == got,
        _ => false,
    };
    if authorized {
        next.run(request).await
    } else {
        tracing::warn!(path = %request.uri().path(), "Rejected request with bad proxy secret");
        ProxyError::Forbidden.into_response()
    }
}

/// Per-IP limit on password reset requests.
pub async fn password_reset_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    match state.reset_limiter.check(&ip) {
        Ok(remaining) => {
            tracing::debug!(%ip, remaining, "Password reset allowed");
            next.run(request).await
        }
        Err(limited) => ProxyError::RateLimited {
            message: RESET_LIMIT_MESSAGE.to_string(),
            retry_after_secs: limited.retry_after_secs,
        }
        .into_response(),
    }
}
