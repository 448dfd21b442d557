//! Maps a frontend state slug (`"anambra-state"`) onto the region the
//! upstream filters by.
//!
//! Resolution order:
//! 1. the static [`REGION_MAP`], which needs no network;
//! 2. the upstream region list: exact slug, slug without `-state`, then name;
//! 3. a region synthesized from the slug itself.
//!
//! Only a missing or empty upstream list makes resolution fail.

use crate::api::load_regions;
use crate::models::{AppState, Region};
use crate::utils::{dashes_to_spaces, strip_state_suffix};

/// Frontend slug → canonical state name, one entry per state plus the FCT.
pub const REGION_MAP: &[(&str, &str)] = &[
    ("abia-state", "Abia"),
    ("adamawa-state", "Adamawa"),
    ("akwa-ibom-state", "Akwa Ibom"),
    ("anambra-state", "Anambra"),
    ("bauchi-state", "Bauchi"),
    ("bayelsa-state", "Bayelsa"),
    ("benue-state", "Benue"),
    ("borno-state", "Borno"),
    ("cross-river-state", "Cross River"),
    ("delta-state", "Delta"),
    ("ebonyi-state", "Ebonyi"),
    ("edo-state", "Edo"),
    ("ekiti-state", "Ekiti"),
    ("enugu-state", "Enugu"),
    ("gombe-state", "Gombe"),
    ("imo-state", "Imo"),
    ("jigawa-state", "Jigawa"),
    ("kaduna-state", "Kaduna"),
    ("kano-state", "Kano"),
    ("katsina-state", "Katsina"),
    ("kebbi-state", "Kebbi"),
    ("kogi-state", "Kogi"),
    ("kwara-state", "Kwara"),
    ("lagos-state", "Lagos"),
    ("nasarawa-state", "Nasarawa"),
    ("niger-state", "Niger"),
    ("ogun-state", "Ogun"),
    ("ondo-state", "Ondo"),
    ("osun-state", "Osun"),
    ("oyo-state", "Oyo"),
    ("plateau-state", "Plateau"),
    ("rivers-state", "Rivers"),
    ("sokoto-state", "Sokoto"),
    ("taraba-state", "Taraba"),
    ("yobe-state", "Yobe"),
    ("zamfara-state", "Zamfara"),
    ("fct-abuja", "Federal Capital Territory"),
];

/// Exact (case-sensitive) lookup in [`REGION_MAP`].
pub fn static_region_name(slug: &str) -> Option<&'static str> {
    REGION_MAP
        .iter()
        .find(|(key, _)| *key == slug)
        .map(|(_, name)| *name)
}

/// Static-map hit as a [`Region`]. `slug` carries the name, since the
/// upstream filters on names rather than its own slugs.
pub fn resolve_static(slug: &str) -> Option<Region> {
    static_region_name(slug).map(|name| Region::synthetic(name, name))
}

/// Match `slug` against an already fetched region list, synthesizing a
/// region when nothing matches. Returns `None` only for an empty list.
pub fn resolve_in_list(slug: &str, regions: &[Region]) -> Option<Region> {
    if regions.is_empty() {
        return None;
    }
    let lowered = slug.to_lowercase();
    let clean_slug = strip_state_suffix(slug);
    let clean_name = dashes_to_spaces(&clean_slug);

    let found = regions
        .iter()
        .find(|r| r.slug.to_lowercase() == lowered)
        .or_else(|| regions.iter().find(|r| r.slug.to_lowercase() == clean_slug))
        .or_else(|| regions.iter().find(|r| r.name.to_lowercase() == clean_name));

    match found {
        Some(r) => Some(r.clone()),
        None if !clean_slug.is_empty() => Some(Region::synthetic(dashes_to_spaces(slug), clean_slug)),
        // "-state" alone strips to nothing; keep the input so slug stays non-empty
        None => Some(Region::synthetic(dashes_to_spaces(slug), lowered)),
    }
}

/// Resolve a frontend slug, consulting the upstream only when the static
/// map has no entry. Upstream failure is logged and reported as `None`.
pub async fn resolve_region(state: &AppState, slug: &str) -> Option<Region> {
    if let Some(region) = resolve_static(slug) {
        tracing::debug!(slug, region = %region.name, "Region resolved from static map");
        return Some(region);
    }

    let regions = match load_regions(state).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(slug, error = %e, "Could not fetch region list");
            return None;
        }
    };

    let resolved = resolve_in_list(slug, &regions);
    match &resolved {
        Some(r) => tracing::debug!(slug, region = %r.name, synthetic = r.id.is_none(), "Region resolved"),
        None => tracing::warn!(slug, "Region list was empty"),
    }
    resolved
}
