use serde::Serialize;
use serde_json::json;

use crate::api::{fetch_ems_markers, fetch_listings, or_fallback, ListingQuery};
use crate::models::{AppState, Marker, Region};
use super::marker_merge::merge_markers;
use super::marker_normalizer::{normalize_markers, records_from_payload};
use super::region_resolver::resolve_region;

/// Resolved region plus every marker known for it.
#[derive(Debug, Clone, Serialize)]
pub struct StateDetails {
    pub region: Region,
    pub markers: Vec<Marker>,
}

#[derive(Debug, thiserror::Error)]
pub enum StateDetailsError {
    #[error("Region not found")]
    RegionNotFound,
}

/// Normalized EMS markers for a resolved region, `[]` when the feed fails.
pub async fn ems_markers_for(state: &AppState, region: &Region) -> Vec<Marker> {
    let payload = or_fallback(
        "ems markers",
        fetch_ems_markers(state, &region.name).await,
        json!([]),
    );
    normalize_markers(&records_from_payload(&payload))
}

/// Resolve `slug`, fetch EMS markers and listings for it side by side, and
/// merge them with EMS entries taking precedence.
pub async fn state_details(state: &AppState, slug: &str) -> Result<StateDetails, StateDetailsError> {
    let region = resolve_region(state, slug)
        .await
        .ok_or(StateDetailsError::RegionNotFound)?;

    let listing_query = ListingQuery {
        country: Some(state.country.as_str()),
        region: Some(region.name.as_str()),
        search: None,
    };
    let (ems_raw, listings_raw) = tokio::join!(
        fetch_ems_markers(state, &region.name),
        fetch_listings(state, &listing_query),
    );
    let ems_raw = or_fallback("ems markers", ems_raw, json!([]));
    let listings_raw = or_fallback("listings", listings_raw, json!([]));

    let ems = normalize_markers(&records_from_payload(&ems_raw));
    let listings = normalize_markers(&records_from_payload(&listings_raw));
    let (ems_count, listing_count) = (ems.len(), listings.len());
    let mut markers = merge_markers(ems, listings);

    tracing::info!(
        slug,
        region = %region.name,
        ems = ems_count,
        listings = listing_count,
        merged = markers.len(),
        "State details assembled"
    );

    if markers.is_empty() && state.placeholder_markers {
        markers.push(Marker::placeholder(&region.name));
    }

    Ok(StateDetails { region, markers })
}
