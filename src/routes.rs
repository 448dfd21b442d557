use std::any::Any;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, middleware::PROXY_SECRET_HEADER};
use crate::models::AppState;

/// Uploads are buffered in memory before being forwarded.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

fn state_details_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "State details handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "Failed to fetch state details",
            "region": null,
            "markers": [],
        })),
    )
        .into_response()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(PROXY_SECRET_HEADER),
        ])
        .max_age(Duration::from_secs(60 * 60));

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(AnyOrigin);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(parsed).allow_credentials(true)
}

pub fn build_router(state: AppState) -> Router {
    let state_details = Router::new()
        .route("/api/state-details/:slug", get(handlers::regions::state_details_get))
        .route("/state-details/:slug", get(handlers::regions::state_details_get))
        .route_layer(CatchPanicLayer::custom(state_details_panic));

    let guarded = Router::new()
        .route("/api/businesses/submit", post(handlers::businesses::submit))
        .route_layer(from_fn_with_state(state.clone(), handlers::middleware::require_proxy_secret));

    let limited = Router::new()
        .route("/api/auth/forgot-password", post(handlers::auth::forgot_password_post))
        .route_layer(from_fn_with_state(state.clone(), handlers::middleware::password_reset_limit));

    let uploads = Router::new()
        .route("/upload-ninja", post(handlers::forms::upload_ninja))
        .route("/upload-media", post(handlers::forms::upload_media_post))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .route("/health", get(handlers::system::health))
        .route("/test", get(handlers::system::test))
        .route("/api/regions", get(handlers::regions::regions_list))
        .route("/api/markers/:slug", get(handlers::regions::markers_get))
        .route("/api/businesses", get(handlers::businesses::search))
        .route("/api/businesses/:id", get(handlers::businesses::details))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/submit-ninja", post(handlers::forms::submit_ninja))
        .route("/submit", post(handlers::forms::submit_raw))
        .merge(state_details)
        .merge(guarded)
        .merge(limited)
        .merge(uploads)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.allowed_origins)),
        )
        .with_state(state)
}
