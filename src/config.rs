use std::env;
use std::path::Path;
use std::time::Duration;

use crate::utils::{parse_csv_list, parse_flag};

// Default configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_BEEKEYS_BASE_URL: &str = "https://app.beekeys.com/nigeria";
pub const DEFAULT_COUNTRY: &str = "nigeria";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "https://beekeys-home.vercel.app,http://localhost:3000";
pub const DEFAULT_NINJA_FORM_ID: &str = "8";
pub const DEFAULT_NINJA_UPLOAD_FIELD_ID: &str = "164";
pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";
pub const UPSTREAM_USER_AGENT: &str = "Mozilla/5.0";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_host() -> String {
    env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string())
}

/// Root of the WordPress site, e.g. `https://app.beekeys.com/nigeria`.
/// REST routes live under `/wp-json`, AJAX under `/wp-admin/admin-ajax.php`.
pub fn get_beekeys_base_url() -> String {
    sanitize_base_url(&env::var("BEEKEYS_BASE_URL").unwrap_or_else(|_| DEFAULT_BEEKEYS_BASE_URL.to_string()))
}

pub fn get_country() -> String {
    let raw = env::var("BEEKEYS_COUNTRY").unwrap_or_default();
    let t = raw.trim();
    if t.is_empty() {
        DEFAULT_COUNTRY.to_string()
    } else {
        t.to_lowercase()
    }
}

pub fn get_beekeys_cookie() -> String {
    env::var("BEEKEYS_COOKIE").unwrap_or_default()
}

/// Shared secret expected in `x-proxy-secret`. `None` when unset, in which
/// case every guarded request is rejected.
pub fn get_proxy_secret() -> Option<String> {
    env::var("PROXY_SECRET").ok().filter(|s| !s.trim().is_empty())
}

pub fn get_unsplash_key() -> Option<String> {
    env::var("UNSPLASH_KEY").ok().filter(|s| !s.trim().is_empty())
}

pub fn get_unsplash_base_url() -> String {
    sanitize_base_url(&env::var("UNSPLASH_BASE_URL").unwrap_or_else(|_| DEFAULT_UNSPLASH_BASE_URL.to_string()))
}

pub fn get_allowed_origins() -> Vec<String> {
    let raw = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
    parse_csv_list(&raw)
        .into_iter()
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}

/// WordPress REST base used for media uploads (`<url>/media`).
pub fn get_wp_api_url() -> Option<String> {
    env::var("WP_API_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(|s| sanitize_base_url(&s))
}

pub fn get_wp_credentials() -> Option<(String, String)> {
    let user = env::var("WP_USERNAME").ok().filter(|s| !s.is_empty())?;
    let pass = env::var("WP_PASSWORD").unwrap_or_default();
    Some((user, pass))
}

pub fn get_ninja_form_id() -> String {
    env::var("NINJA_FORM_ID").unwrap_or_else(|_| DEFAULT_NINJA_FORM_ID.to_string())
}

pub fn get_ninja_upload_field_id() -> String {
    env::var("NINJA_UPLOAD_FIELD_ID").unwrap_or_else(|_| DEFAULT_NINJA_UPLOAD_FIELD_ID.to_string())
}

/// Term ids appended as `term[]` to the EMS marker query.
pub fn get_ems_terms() -> Vec<String> {
    parse_csv_list(&env::var("EMS_TERMS").unwrap_or_default())
}

pub fn get_upstream_timeout() -> Option<Duration> {
    env::var("UPSTREAM_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

/// Whether state details substitute a sample marker for an empty result.
pub fn get_placeholder_markers() -> bool {
    parse_flag(env::var("PLACEHOLDER_MARKERS").ok().as_ref(), true)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BEEKEYS_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Configuration errors surfaced by `check-config`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid host/port: {0}")]
    InvalidAddr(String),

    #[error("BEEKEYS_BASE_URL must start with http:// or https:// (got {0})")]
    InvalidBaseUrl(String),

    #[error("ALLOWED_ORIGINS contains an invalid origin: {0}")]
    InvalidOrigin(String),
}

/// Static checks on the loaded environment. Connectivity is checked separately.
pub fn validate() -> Vec<ConfigError> {
    let mut problems = Vec::new();
    let base = get_beekeys_base_url();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        problems.push(ConfigError::InvalidBaseUrl(base));
    }
    for origin in get_allowed_origins() {
        if origin != "*" && !(origin.starts_with("http://") || origin.starts_with("https://")) {
            problems.push(ConfigError::InvalidOrigin(origin));
        }
    }
    let addr = format!("{}:{}", get_host(), env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string()));
    if addr.parse::<std::net::SocketAddr>().is_err() {
        problems.push(ConfigError::InvalidAddr(addr));
    }
    problems
}
