use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::config::UPSTREAM_USER_AGENT;
use crate::models::{AppState, UploadedFile};
use crate::utils::{is_truthy, value_to_short_string};
use super::client::{send_json, send_passthrough, FetchError};

/// Ninja Forms exposes its AJAX nonce as `settings.key` (newer releases) or
/// `settings.nonce`.
pub fn nonce_from_form(payload: &Value) -> Option<String> {
    let settings = payload.get("settings")?;
    ["key", "nonce"].iter().find_map(|k| {
        settings
            .get(*k)
            .filter(|v| is_truthy(v))
            .map(value_to_short_string)
    })
}

/// `formData.id` when present, otherwise the configured form.
pub fn form_id_of(form_data: &Value, default: &str) -> String {
    form_data
        .get("id")
        .filter(|v| is_truthy(v))
        .map(value_to_short_string)
        .unwrap_or_else(|| default.to_string())
}

pub async fn fetch_nonce(state: &AppState, form_id: &str) -> Result<String, FetchError> {
    let params = [("action", "nf_get_form"), ("form_id", form_id)];
    let req = state
        .client
        .get(state.ajax_url())
        .query(&params)
        .header(USER_AGENT, UPSTREAM_USER_AGENT);
    let payload = send_json(req).await.map_err(|e| {
        tracing::error!(form_id, error = %e, "Error fetching nonce");
        e
    })?;
    nonce_from_form(&payload).ok_or(FetchError::MissingNonce)
}

/// Submit `form_data` through `nf_ajax_submit`, fetching a fresh nonce first.
pub async fn submit_ninja_form(state: &AppState, form_data: &Value) -> Result<Value, FetchError> {
    let form_id = form_id_of(form_data, &state.ninja_form_id);
    let nonce = fetch_nonce(state, &form_id).await?;
    let encoded = serde_json::to_string(form_data).unwrap_or_default();
    let fields = [
        ("action", "nf_ajax_submit"),
        ("security", nonce.as_str()),
        ("formData", encoded.as_str()),
    ];
    let req = state.client.post(state.ajax_url()).form(&fields);
    let (_, body) = send_passthrough(req).await?;
    Ok(body)
}

/// Hand a file to the Ninja Forms file-upload add-on (`nf_fu_upload`).
pub async fn upload_ninja_file(state: &AppState, file: UploadedFile) -> Result<Value, FetchError> {
    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(ct) = file.content_type.as_deref() {
        part = part.mime_str(ct)?;
    }
    let form = Form::new()
        .text("action", "nf_fu_upload")
        .text("form_id", state.ninja_form_id.clone())
        .text("field_id", state.ninja_upload_field_id.clone())
        .part("file", part);
    let req = state.client.post(state.ajax_url()).multipart(form);
    let (_, body) = send_passthrough(req).await?;
    Ok(body)
}

/// Flatten a JSON object into form fields; nested values are sent as JSON.
pub fn form_fields(fields: &Map<String, Value>) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), value_to_short_string(v)))
        .collect()
}

/// Post arbitrary fields to admin-ajax as the logged-in session user.
pub async fn submit_raw_form(state: &AppState, fields: &Map<String, Value>) -> Result<Value, FetchError> {
    let mut req = state
        .client
        .post(state.ajax_url())
        .form(&form_fields(fields))
        .header(USER_AGENT, UPSTREAM_USER_AGENT);
    if !state.beekeys_cookie.is_empty() {
        req = req.header(COOKIE, &state.beekeys_cookie);
    }
    let (_, body) = send_passthrough(req).await?;
    Ok(body)
}
