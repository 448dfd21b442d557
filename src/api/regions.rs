use serde_json::{Map, Value};

use crate::models::{AppState, Region};
use crate::utils::{is_truthy, slugify};
use super::client::{fetch_json, FetchError};

pub const REGIONS_ROUTE: &str = "geodir/v2/locations/regions";

/// Pull the row list out of a region payload: either a bare array or an
/// `{ "items": [...] }` envelope.
pub fn region_rows(payload: Value) -> Vec<Map<String, Value>> {
    let rows = match payload {
        Value::Array(arr) => arr,
        Value::Object(mut obj) => match obj.remove("items") {
            Some(Value::Array(arr)) => arr,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    rows.into_iter()
        .filter_map(|r| match r {
            Value::Object(obj) => Some(obj),
            _ => None,
        })
        .collect()
}

/// Display name of a row: `name`, then `title` (plain or `{rendered}`).
pub fn row_name(obj: &Map<String, Value>) -> Option<String> {
    for key in ["name", "title"] {
        match obj.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Object(inner)) => {
                if let Some(s) = inner.get("rendered").and_then(|v| v.as_str()).filter(|s| !s.is_empty()) {
                    return Some(s.to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Convert one upstream row into a [`Region`]. Rows with neither a slug nor
/// a name are skipped; a missing slug is derived from the name.
pub fn parse_region(obj: &Map<String, Value>) -> Option<Region> {
    let id = obj.get("id").and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    });
    let name = row_name(obj);
    let slug = obj
        .get("slug")
        .filter(|v| is_truthy(v))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .or_else(|| name.as_deref().map(slugify))
        .filter(|s| !s.is_empty())?;
    Some(Region {
        id,
        name: name.unwrap_or_else(|| slug.clone()),
        slug,
    })
}

/// Raw region rows straight from GeoDirectory.
pub async fn load_region_rows(
    state: &AppState,
    per_page: Option<u32>,
) -> Result<Vec<Map<String, Value>>, FetchError> {
    let mut params = Vec::new();
    if let Some(n) = per_page {
        params.push(("per_page".to_string(), n.to_string()));
    }
    let payload = fetch_json(&state.client, &state.rest_url(REGIONS_ROUTE), &params).await?;
    Ok(region_rows(payload))
}

/// All upstream regions as [`Region`]s.
pub async fn load_regions(state: &AppState) -> Result<Vec<Region>, FetchError> {
    let rows = load_region_rows(state, None).await?;
    Ok(rows.iter().filter_map(parse_region).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn rows_from_array_or_items() {
        assert_eq!(region_rows(json!([{"id": 1}, 5, {"id": 2}])).len(), 2);
        assert_eq!(region_rows(json!({"items": [{"id": 1}]})).len(), 1);
        assert!(region_rows(json!({"error": "x"})).is_empty());
        assert!(region_rows(json!("nope")).is_empty());
    }

    #[test]
    fn parse_region_prefers_name_then_title() {
        let r = parse_region(&obj(json!({"id": 4, "slug": "lagos", "name": "Lagos"}))).unwrap();
        assert_eq!(r, Region { id: Some(4), name: "Lagos".into(), slug: "lagos".into() });

        let r = parse_region(&obj(json!({"id": "9", "title": {"rendered": "Cross River"}}))).unwrap();
        assert_eq!(r.id, Some(9));
        assert_eq!(r.name, "Cross River");
        assert_eq!(r.slug, "cross-river");
    }

    #[test]
    fn parse_region_skips_rows_without_identity() {
        assert!(parse_region(&obj(json!({"id": 3}))).is_none());
        assert!(parse_region(&obj(json!({"slug": "", "name": ""}))).is_none());
    }
}
