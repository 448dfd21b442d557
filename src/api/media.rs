use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::models::{AppState, UploadedFile};
use crate::utils::join_url;
use super::client::{send_passthrough, FetchError};

/// `Content-Disposition` for a WordPress media upload. Quotes and
/// backslashes in the name would break the header, so they are dropped.
pub fn attachment_disposition(file_name: &str) -> String {
    let clean: String = file_name.chars().filter(|c| *c != '"' && *c != '\\').collect();
    format!("attachment; filename=\"{}\"", clean)
}

/// Upload a file to the WordPress media library (`POST <WP_API_URL>/media`).
pub async fn upload_media(state: &AppState, file: UploadedFile) -> Result<(StatusCode, Value), FetchError> {
    let base = state.wp_api_url.as_deref().ok_or(FetchError::NotConfigured("WP_API_URL"))?;
    let mut req = state
        .client
        .post(join_url(base, "media"))
        .header(CONTENT_DISPOSITION, attachment_disposition(&file.file_name))
        .header(CONTENT_TYPE, file.content_type_or_default().to_string());
    if let Some((user, pass)) = &state.wp_credentials {
        req = req.basic_auth(user, Some(pass));
    }
    send_passthrough(req.body(file.bytes)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_strips_quotes() {
        assert_eq!(attachment_disposition("logo.png"), "attachment; filename=\"logo.png\"");
        assert_eq!(attachment_disposition("a\"b\\c.jpg"), "attachment; filename=\"abc.jpg\"");
    }
}
