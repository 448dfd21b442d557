use crate::api::search_region_photo;
use crate::models::{AppState, StateImage};

/// Thumbnail for `region_name`, served from the cache while fresh.
///
/// Failed lookups return an empty image and are not cached, so the next
/// request tries again.
pub async fn state_image(state: &AppState, region_name: &str) -> StateImage {
    let cache = &state.image_cache;
    if let Some(hit) = cache.get_fresh(region_name) {
        return hit;
    }
    if state.unsplash_key.is_none() {
        return StateImage::empty(cache.now());
    }

    match search_region_photo(state, region_name).await {
        Ok((url, credit)) => {
            let image = StateImage {
                url,
                credit,
                last_fetched: cache.now(),
            };
            cache.set(region_name, image.clone());
            image
        }
        Err(e) => {
            tracing::warn!(region = region_name, error = %e, "Unsplash fetch failed");
            StateImage::empty(cache.now())
        }
    }
}
