use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::models::AppState;
use super::client::{send_passthrough, FetchError};

pub const REGISTER_ROUTE: &str = "userswp/v1/register";
pub const FORGOT_PASSWORD_ROUTE: &str = "custom/v1/forgot-password";

/// Forward a registration form to UsersWP unchanged.
pub async fn register_user(state: &AppState, body: &Value) -> Result<(StatusCode, Value), FetchError> {
    let req = state.client.post(state.rest_url(REGISTER_ROUTE)).json(body);
    send_passthrough(req).await
}

pub async fn forgot_password(state: &AppState, user_login: &Value) -> Result<(StatusCode, Value), FetchError> {
    let req = state
        .client
        .post(state.rest_url(FORGOT_PASSWORD_ROUTE))
        .json(&json!({ "user_login": user_login }));
    send_passthrough(req).await
}
