use serde_json::Value;

use crate::models::{AppState, Credit};
use super::client::{fetch_json, FetchError};

/// First search hit as `(url, credit)`. No hit gives `(None, None)`.
pub fn photo_from_search(payload: &Value) -> (Option<String>, Option<Credit>) {
    let first = match payload.get("results").and_then(|r| r.get(0)) {
        Some(f) => f,
        None => return (None, None),
    };
    let url = first
        .pointer("/urls/regular")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let credit = Credit {
        name: first.pointer("/user/name").and_then(|v| v.as_str()).map(str::to_string),
        link: first.pointer("/user/links/html").and_then(|v| v.as_str()).map(str::to_string),
    };
    (url, Some(credit))
}

/// Look up a landscape photo of `region_name` on Unsplash.
pub async fn search_region_photo(
    state: &AppState,
    region_name: &str,
) -> Result<(Option<String>, Option<Credit>), FetchError> {
    let key = state.unsplash_key.as_deref().ok_or(FetchError::NotConfigured("UNSPLASH_KEY"))?;
    let params = vec![
        ("query".to_string(), format!("{} {}", region_name, country_label(&state.country))),
        ("orientation".to_string(), "landscape".to_string()),
        ("per_page".to_string(), "1".to_string()),
        ("client_id".to_string(), key.to_string()),
    ];
    let url = format!("{}/search/photos", state.unsplash_base_url);
    let payload = fetch_json(&state.client, &url, &params).await?;
    Ok(photo_from_search(&payload))
}

/// `"nigeria"` → `"Nigeria"`
fn country_label(country: &str) -> String {
    let mut chars = country.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
