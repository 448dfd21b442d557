use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Multipart, Request};
use axum::http::HeaderMap;

use crate::error::ProxyError;
use crate::models::UploadedFile;

/// Client address for rate limiting: first `X-Forwarded-For` hop when behind
/// a proxy, else the socket peer. `"unknown"` when neither is available.
pub fn client_ip(request: &Request) -> String {
    if let Some(ip) = forwarded_ip(request.headers()) {
        return ip;
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("x-forwarded-for")?.to_str().ok()?;
    raw.split(',')
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Pull the multipart part named `field` into memory. `Ok(None)` when the
/// form has no such part.
pub async fn read_file_field(
    multipart: &mut Multipart,
    field: &str,
) -> Result<Option<UploadedFile>, ProxyError> {
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| ProxyError::bad_request(e.body_text()))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let file_name = part.file_name().unwrap_or("upload").to_string();
        let content_type = part.content_type().map(str::to_string);
        let bytes = part
            .bytes()
            .await
            .map_err(|e| ProxyError::bad_request(e.body_text()))?;
        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn forwarded_for_wins_over_peer() {
        let mut req = Request::builder()
            .header("x-forwarded-for", " 203.0.113.9 , 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
        assert_eq!(client_ip(&req), "203.0.113.9");
    }

    #[test]
    fn falls_back_to_peer_then_unknown() {
        let mut req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&req), "unknown");
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 7], 4000))));
        assert_eq!(client_ip(&req), "192.168.1.7");
    }
}
