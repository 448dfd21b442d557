use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::{forgot_password, register_user};
use crate::error::{ProxyError, Result};
use crate::models::AppState;

/// `POST /api/auth/register`: relayed to UsersWP, status and body mirrored.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    let (status, resp) = register_user(&state, &body)
        .await
        .map_err(|e| ProxyError::mirrored(e, json!({ "error": "Registration failed" })))?;
    Ok((status, Json(resp)))
}

/// `POST /api/auth/forgot-password` with `{user_login}`. Rate limited per IP
/// by the router.
pub async fn forgot_password_post(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    let user_login = body.get("user_login").cloned().unwrap_or(Value::Null);
    let (status, resp) = forgot_password(&state, &user_login)
        .await
        .map_err(|e| ProxyError::mirrored(e, json!({ "message": "Reset failed" })))?;
    Ok((status, Json(resp)))
}
