use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::future::join_all;
use serde_json::{json, Value};

use crate::api::load_region_rows;
use crate::api::regions::row_name;
use crate::error::{ProxyError, Result};
use crate::models::{AppState, RegionSummary, StateImage};
use crate::services::{ems_markers_for, resolve_region, state_details, state_image, StateDetailsError};

const REGIONS_PER_PAGE: u32 = 50;

/// `GET /api/regions`: upstream rows with a thumbnail attached to each.
pub async fn regions_list(State(state): State<AppState>) -> Result<Json<Value>> {
    let rows = load_region_rows(&state, Some(REGIONS_PER_PAGE))
        .await
        .map_err(|e| ProxyError::upstream("Failed to fetch regions", e))?;

    let lookups = rows.iter().map(|row| {
        let state = &state;
        async move {
            match row_name(row) {
                Some(name) => state_image(state, &name).await,
                None => StateImage::empty(state.image_cache.now()),
            }
        }
    });
    let images = join_all(lookups).await;

    let data: Vec<RegionSummary> = rows
        .into_iter()
        .zip(images)
        .map(|(upstream, image)| RegionSummary {
            upstream,
            thumbnail: image.url,
            credit: image.credit,
        })
        .collect();

    tracing::info!(count = data.len(), "Regions listed");
    Ok(Json(json!({ "success": true, "data": data })))
}

fn region_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Region not found",
            "region": null,
            "markers": [],
        })),
    )
        .into_response()
}

/// `GET /api/state-details/:slug`
pub async fn state_details_get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state_details(&state, &slug).await {
        Ok(details) => Json(json!({
            "success": true,
            "region": details.region,
            "markers": details.markers,
        }))
        .into_response(),
        Err(StateDetailsError::RegionNotFound) => {
            tracing::warn!(%slug, "State details requested for unknown region");
            region_not_found()
        }
    }
}

/// `GET /api/markers/:slug`: EMS markers only.
pub async fn markers_get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    let Some(region) = resolve_region(&state, &slug).await else {
        return region_not_found();
    };
    let markers = ems_markers_for(&state, &region).await;
    Json(json!({ "success": true, "data": markers })).into_response()
}
