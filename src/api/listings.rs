use serde_json::{json, Value};

use crate::models::AppState;
use super::client::{fetch_json, fetch_json_or, FetchError};

pub const LISTINGS_ROUTE: &str = "geodir/v2/listings";
pub const SINGLE_ROUTE: &str = "geodir/v2/single";

/// Listings filter. `None` fields are left out of the query.
#[derive(Debug, Default, Clone)]
pub struct ListingQuery<'a> {
    pub country: Option<&'a str>,
    pub region: Option<&'a str>,
    pub search: Option<&'a str>,
}

impl ListingQuery<'_> {
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        for (key, value) in [("country", self.country), ("region", self.region), ("search", self.search)] {
            if let Some(v) = value {
                params.push((key.to_string(), v.to_string()));
            }
        }
        params
    }
}

pub async fn fetch_listings(state: &AppState, query: &ListingQuery<'_>) -> Result<Value, FetchError> {
    fetch_json(&state.client, &state.rest_url(LISTINGS_ROUTE), &query.params()).await
}

/// Search listings, falling back to an empty list when the upstream fails.
pub async fn search_listings(state: &AppState, query: &ListingQuery<'_>) -> Value {
    fetch_json_or(&state.client, &state.rest_url(LISTINGS_ROUTE), &query.params(), json!([])).await
}

/// Single listing by id, or `null` when the upstream fails.
pub async fn fetch_business(state: &AppState, id: &str) -> Value {
    fetch_json_or(&state.client, &business_url(state, id), &[], Value::Null).await
}

fn business_url(state: &AppState, id: &str) -> String {
    state.rest_url(&format!("{}/{}", SINGLE_ROUTE, urlencoding::encode(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_skip_missing_fields() {
        let q = ListingQuery { country: Some("nigeria"), region: Some("Lagos"), search: None };
        assert_eq!(
            q.params(),
            vec![
                ("country".to_string(), "nigeria".to_string()),
                ("region".to_string(), "Lagos".to_string()),
            ]
        );
        let q = ListingQuery { search: Some(""), ..Default::default() };
        assert_eq!(q.params(), vec![("search".to_string(), String::new())]);
    }
}
