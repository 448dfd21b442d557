//! Errors returned by route handlers, rendered as the JSON error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use crate::api::FetchError;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Required input missing or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// Shared-secret header absent or wrong.
    #[error("Unauthorized")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    RateLimited { message: String, retry_after_secs: i64 },

    /// An upstream call failed. The upstream status is mirrored when there
    /// is one; `message` is what the browser sees as `error`.
    #[error("{message}: {source}")]
    Upstream {
        message: String,
        #[source]
        source: FetchError,
    },

    /// Relay an upstream error body verbatim, falling back to `fallback`
    /// when the upstream gave nothing usable.
    #[error("{source}")]
    Mirrored {
        #[source]
        source: FetchError,
        fallback: Value,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ProxyError::BadRequest(msg.into())
    }

    pub fn upstream(message: impl Into<String>, source: FetchError) -> Self {
        ProxyError::Upstream {
            message: message.into(),
            source,
        }
    }

    pub fn mirrored(source: FetchError, fallback: Value) -> Self {
        ProxyError::Mirrored { source, fallback }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Forbidden => StatusCode::FORBIDDEN,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::Upstream { source, .. } | ProxyError::Mirrored { source, .. } => {
                source.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ProxyError::Upstream { message, source } => {
                tracing::error!(error = %source, "{}", message);
                let details = source
                    .body()
                    .cloned()
                    .unwrap_or_else(|| Value::String(source.to_string()));
                json!({ "success": false, "error": message, "details": details })
            }
            ProxyError::Mirrored { source, fallback } => {
                tracing::error!(error = %source, "Upstream rejected request");
                source.body().cloned().unwrap_or_else(|| fallback.clone())
            }
            ProxyError::RateLimited { message, .. } => {
                tracing::warn!("{}", message);
                json!({ "success": false, "message": message })
            }
            ProxyError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                json!({ "success": false, "error": msg })
            }
            other => json!({ "success": false, "error": other.to_string() }),
        };

        let mut response = (status, Json(body)).into_response();
        if let ProxyError::RateLimited { retry_after_secs, .. } = self {
            if let Ok(v) = retry_after_secs.to_string().parse() {
                response.headers_mut().insert(axum::http::header::RETRY_AFTER, v);
            }
        }
        response
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ProxyError>;
