use reqwest::header::{HeaderMap, AUTHORIZATION, COOKIE};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use yansi::Paint;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Ways an upstream call can fail.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: DNS, connect, TLS, timeout, or reading the body.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status. `body` is the parsed JSON
    /// body, or the raw text as a JSON string when it was not JSON.
    #[error("Upstream returned HTTP {status}")]
    Status { status: StatusCode, body: Value },

    #[error("Upstream returned a non-JSON body")]
    InvalidJson,

    /// WordPress redirected to its login page instead of answering.
    #[error("Session expired or invalid response. Please update cookies.")]
    SessionExpired,

    #[error("Nonce not found in form data")]
    MissingNonce,

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl FetchError {
    /// Upstream status worth mirroring to the caller, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Upstream body worth mirroring to the caller, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            FetchError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

fn masked_headers(headers: &HeaderMap) -> Vec<String> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == COOKIE || name == AUTHORIZATION {
                "***".to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new(format!("'{}: {}'", name, shown)).fg(yansi::Color::Magenta)
            )
        })
        .collect()
}

// Query parameters that carry credentials
const SECRET_PARAMS: &[&str] = &["client_id"];

fn masked_url(url: &reqwest::Url) -> String {
    if !url.query_pairs().any(|(k, _)| SECRET_PARAMS.contains(&k.as_ref())) {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let shown = if SECRET_PARAMS.contains(&k.as_ref()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), shown)
        })
        .collect();
    let mut masked = url.clone();
    (&mut masked.query_pairs_mut()).clear().extend_pairs(pairs);
    masked.to_string()
}

fn log_request(request: &reqwest::Request) {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(request.method().as_str()).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(masked_url(request.url())).fg(yansi::Color::Cyan)));
    parts.extend(masked_headers(request.headers()));
    if let Some(bytes) = request.body().and_then(|b| b.as_bytes()) {
        let escaped = String::from_utf8_lossy(bytes).replace('\'', "'\\''");
        parts.push(format!(
            "{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped)).fg(yansi::Color::White)
        ));
    } else if request.body().is_some() {
        parts.push(Paint::new("--data-binary <stream>").fg(yansi::Color::Blue).to_string());
    }
    log_output(format!("Request:\n{}", parts.join(" ")));
}

/// Send a request and hand back the status and raw body text.
async fn execute(req: RequestBuilder) -> Result<(StatusCode, String), FetchError> {
    let (client, request) = req.build_split();
    let request = request?;
    log_request(&request);

    let method = request.method().clone();
    let url = request.url().clone();
    tracing::debug!(%method, %url, "Upstream request");

    let resp = client.execute(request).await.map_err(|e| {
        tracing::warn!(%method, %url, error = %e, "Upstream request failed");
        e
    })?;
    let status = resp.status();
    let text = resp.text().await?;

    // Grayed out so responses are easy to tell apart from requests
    log_output(format!("Response:\n{}", Paint::new(format!("HTTP {} {}", status.as_u16(), text)).rgb(100, 100, 100)));
    tracing::debug!(%method, %url, status = status.as_u16(), bytes = text.len(), "Upstream response");

    Ok((status, text))
}

fn parse_body(text: &str) -> Result<Value, FetchError> {
    if text.trim().is_empty() {
        return Err(FetchError::InvalidJson);
    }
    match serde_json::from_str(text) {
        Ok(v) => Ok(v),
        Err(_) if text.contains("wp-login.php") => Err(FetchError::SessionExpired),
        Err(_) => Err(FetchError::InvalidJson),
    }
}

fn status_error(status: StatusCode, text: String) -> FetchError {
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    FetchError::Status { status, body }
}

/// Send `req` and parse a JSON body. Non-2xx, empty and non-JSON bodies are
/// all errors.
pub async fn send_json(req: RequestBuilder) -> Result<Value, FetchError> {
    let (status, text) = execute(req).await?;
    if !status.is_success() {
        return Err(status_error(status, text));
    }
    parse_body(&text)
}

/// Like [`send_json`] for calls whose answer is relayed to the browser:
/// keeps the upstream status and accepts non-JSON bodies as a JSON string.
pub async fn send_passthrough(req: RequestBuilder) -> Result<(StatusCode, Value), FetchError> {
    let (status, text) = execute(req).await?;
    if !status.is_success() {
        return Err(status_error(status, text));
    }
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Ok((status, body))
}

/// GET `url` with query `params` and parse the JSON body.
pub async fn fetch_json(
    client: &reqwest::Client,
    url: &str,
    params: &[(String, String)],
) -> Result<Value, FetchError> {
    send_json(client.get(url).query(params)).await
}

/// Fail-soft variant of [`fetch_json`]: any error is logged and `fallback`
/// returned unchanged.
pub async fn fetch_json_or(
    client: &reqwest::Client,
    url: &str,
    params: &[(String, String)],
    fallback: Value,
) -> Value {
    or_fallback(url, fetch_json(client, url, params).await, fallback)
}

/// Collapse a fetch result into its value or `fallback`, logging the failure
/// under `context` (a URL or a short description of the call).
pub fn or_fallback(context: &str, result: Result<Value, FetchError>, fallback: Value) -> Value {
    match result {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(context, error = %e, "Upstream fetch failed, using fallback");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_body_accepts_json() {
        assert_eq!(parse_body(r#"[{"id":1}]"#).unwrap(), json!([{"id": 1}]));
    }

    #[test]
    fn parse_body_rejects_empty_and_html() {
        assert!(matches!(parse_body(""), Err(FetchError::InvalidJson)));
        assert!(matches!(parse_body("<html>oops</html>"), Err(FetchError::InvalidJson)));
        assert!(matches!(
            parse_body(r#"<a href="/wp-login.php">Log in</a>"#),
            Err(FetchError::SessionExpired)
        ));
    }

    #[test]
    fn status_error_keeps_json_or_text_body() {
        let e = status_error(StatusCode::BAD_REQUEST, r#"{"message":"bad"}"#.into());
        assert_eq!(e.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(e.body(), Some(&json!({"message": "bad"})));

        let e = status_error(StatusCode::BAD_GATEWAY, "upstream down".into());
        assert_eq!(e.body(), Some(&json!("upstream down")));
    }

    #[test]
    fn masked_url_hides_api_keys() {
        let url = reqwest::Url::parse(
            "https://api.unsplash.com/search/photos?query=Lagos+Nigeria&client_id=abc123&per_page=1",
        )
        .unwrap();
        let shown = masked_url(&url);
        assert!(!shown.contains("abc123"));
        assert!(shown.contains("client_id=***"));
        assert!(shown.contains("query=Lagos+Nigeria"));
        assert!(shown.contains("per_page=1"));

        let plain = reqwest::Url::parse("https://app.beekeys.com/nigeria/wp-json/geodir/v2/listings?region=Lagos").unwrap();
        assert_eq!(masked_url(&plain), plain.as_str());
    }

    #[test]
    fn or_fallback_returns_fallback_on_error() {
        let v = or_fallback("http://x", Err(FetchError::InvalidJson), json!([]));
        assert_eq!(v, json!([]));
        let v = or_fallback("http://x", Ok(json!({"a": 1})), json!([]));
        assert_eq!(v, json!({"a": 1}));
    }
}
