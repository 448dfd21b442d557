use reqwest::header::{ACCEPT, COOKIE, REFERER, USER_AGENT};
use serde_json::Value;

use crate::config::UPSTREAM_USER_AGENT;
use crate::models::AppState;
use crate::utils::{join_url, slugify};
use super::client::{send_json, FetchError};

pub const MARKERS_ROUTE: &str = "geodir/v2/markers/";

/// Query for the GeoDirectory AJAX marker feed.
pub fn marker_query(post_type: &str, country: &str, region: &str, terms: &[String]) -> Vec<(String, String)> {
    let mut params = vec![
        ("gd-ajax".to_string(), "1".to_string()),
        ("post_type".to_string(), post_type.to_string()),
        ("country".to_string(), country.to_string()),
        ("region".to_string(), region.to_string()),
    ];
    for term in terms {
        params.push(("term[]".to_string(), term.clone()));
    }
    params
}

/// Compact marker payload (`{items, icons}`) for one region. The feed is
/// an AJAX endpoint and only answers requests that look like they came from
/// the site's own map page.
pub async fn fetch_markers(state: &AppState, post_type: &str, region_name: &str) -> Result<Value, FetchError> {
    let url = state.rest_url(MARKERS_ROUTE);
    let referer = join_url(
        &state.beekeys_base_url,
        &format!("location/{}/{}/", state.country, slugify(region_name)),
    );
    let mut req = state
        .client
        .get(&url)
        .query(&marker_query(post_type, &state.country, region_name, &state.ems_terms))
        .header(ACCEPT, "application/json, text/javascript, */*; q=0.01")
        .header("X-Requested-With", "XMLHttpRequest")
        .header(REFERER, referer)
        .header(USER_AGENT, UPSTREAM_USER_AGENT);
    if !state.beekeys_cookie.is_empty() {
        req = req.header(COOKIE, &state.beekeys_cookie);
    }
    send_json(req).await
}

pub async fn fetch_ems_markers(state: &AppState, region_name: &str) -> Result<Value, FetchError> {
    fetch_markers(state, "gd_ems", region_name).await
}
