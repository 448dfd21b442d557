use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{fetch_business, search_listings, ListingQuery};
use crate::error::{ProxyError, Result};
use crate::models::{AppState, BusinessSubmission};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// `GET /api/businesses?search=`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    let query = ListingQuery {
        country: Some(state.country.as_str()),
        region: None,
        search: params.search.as_deref().filter(|s| !s.trim().is_empty()),
    };
    let results = search_listings(&state, &query).await;
    Json(json!({ "success": true, "results": results }))
}

/// `GET /api/businesses/:id`
pub async fn details(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let business = fetch_business(&state, &id).await;
    Json(json!({ "success": true, "business": business }))
}

/// `POST /api/businesses/submit`, behind the proxy secret.
pub async fn submit(Json(body): Json<Value>) -> Result<Json<Value>> {
    let submission: BusinessSubmission = serde_json::from_value(body)
        .map_err(|_| ProxyError::bad_request("Missing required fields"))?;
    if !submission.has_required_fields() {
        return Err(ProxyError::bad_request("Missing required fields"));
    }
    let stamped = submission.stamped(chrono::Utc::now());
    tracing::info!(business = %crate::utils::value_to_short_string(&stamped.business_name), "Business submission received");
    Ok(Json(json!({ "success": true, "data": stamped })))
}
