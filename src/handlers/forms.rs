use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};

use crate::api::{submit_ninja_form, submit_raw_form, upload_media, upload_ninja_file};
use crate::error::{ProxyError, Result};
use crate::models::AppState;
use crate::utils::is_truthy;
use super::helpers::read_file_field;

const FILE_FIELD: &str = "file";

/// `POST /submit-ninja` with `{formData}`.
pub async fn submit_ninja(State(state): State<AppState>, Json(body): Json<Value>) -> Result<Json<Value>> {
    let form_data = body
        .get("formData")
        .filter(|v| is_truthy(v))
        .ok_or_else(|| ProxyError::bad_request("Missing formData"))?;

    let wp_response = submit_ninja_form(&state, form_data)
        .await
        .map_err(|e| ProxyError::upstream("Form submission failed", e))?;
    Ok(Json(json!({ "success": true, "wpResponse": wp_response })))
}

/// `POST /upload-ninja`, multipart with a `file` part.
pub async fn upload_ninja(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<Value>> {
    let file = read_file_field(&mut multipart, FILE_FIELD)
        .await?
        .ok_or_else(|| ProxyError::bad_request("No file uploaded"))?;
    tracing::info!(file = %file.file_name, bytes = file.bytes.len(), "Forwarding Ninja Forms upload");

    let wp_response = upload_ninja_file(&state, file)
        .await
        .map_err(|e| ProxyError::upstream("File upload failed", e))?;
    Ok(Json(json!({ "success": true, "wpResponse": wp_response })))
}

/// `POST /submit`: a flat object relayed to admin-ajax with the session cookie.
pub async fn submit_raw(State(state): State<AppState>, Json(body): Json<Value>) -> Result<Json<Value>> {
    let fields = body
        .as_object()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ProxyError::bad_request("No data provided"))?;

    match submit_raw_form(&state, fields).await {
        Ok(resp) => Ok(Json(json!({ "success": true, "beekeysResponse": resp }))),
        Err(e) => {
            tracing::error!(error = %e, "Beekeys submission failed");
            Err(ProxyError::Internal("Failed to submit to Beekeys".to_string()))
        }
    }
}

/// `POST /upload-media`: push a file into the WordPress media library.
pub async fn upload_media_post(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<Value>> {
    let file = read_file_field(&mut multipart, FILE_FIELD)
        .await?
        .ok_or_else(|| ProxyError::bad_request("No file uploaded"))?;

    let (_, media) = upload_media(&state, file).await.map_err(|e| {
        ProxyError::mirrored(e, json!({ "success": false, "error": "Media upload failed" }))
    })?;
    Ok(Json(json!({ "success": true, "media": media })))
}
