//! Turns the two upstream record shapes into [`Marker`]s.
//!
//! The compact AJAX feed uses one-letter keys (`m`, `t`, `lt`, `ln`, `i`),
//! REST listings spell them out (`id`, `title.rendered`, `latitude`, ...).
//! Each field is read through an ordered list of [`Extract`] strategies and
//! the first truthy value wins.

use serde_json::{Map, Value};

use crate::models::{Marker, MarkerId};
use crate::utils::{is_truthy, parse_leading_float, value_to_short_string};

/// One way of reading a field out of a record.
#[derive(Debug, Clone, Copy)]
pub enum Extract {
    Key(&'static str),
    Nested(&'static str, &'static str),
}

impl Extract {
    fn get<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        match self {
            Extract::Key(k) => record.get(*k),
            Extract::Nested(outer, inner) => record.get(*outer)?.get(*inner),
        }
    }
}

pub const ID_KEYS: &[Extract] = &[Extract::Key("id"), Extract::Key("m")];
pub const TITLE_KEYS: &[Extract] = &[
    Extract::Nested("title", "rendered"),
    Extract::Key("title"),
    Extract::Key("t"),
];
pub const LAT_KEYS: &[Extract] = &[Extract::Key("lat"), Extract::Key("latitude"), Extract::Key("lt")];
pub const LNG_KEYS: &[Extract] = &[Extract::Key("lng"), Extract::Key("longitude"), Extract::Key("ln")];
pub const ICON_KEYS: &[Extract] = &[Extract::Key("icon"), Extract::Key("i")];
pub const SLUG_KEYS: &[Extract] = &[Extract::Key("slug"), Extract::Key("s")];
pub const CATEGORY_KEYS: &[Extract] = &[Extract::Key("category"), Extract::Key("c")];
pub const DESCRIPTION_KEYS: &[Extract] = &[Extract::Key("description"), Extract::Key("d")];

pub const UNTITLED: &str = "Untitled";

/// First truthy value produced by `strategies`, in order.
pub fn first_present<'a>(record: &'a Value, strategies: &[Extract]) -> Option<&'a Value> {
    strategies
        .iter()
        .filter_map(|s| s.get(record))
        .find(|v| is_truthy(v))
}

fn first_string(record: &Value, strategies: &[Extract]) -> Option<String> {
    strategies
        .iter()
        .filter_map(|s| s.get(record))
        .filter(|v| is_truthy(v))
        .find_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn coordinate(record: &Value, strategies: &[Extract]) -> f64 {
    match first_present(record, strategies) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_leading_float(s),
        Some(_) => f64::NAN,
        None => 0.0,
    }
}

fn usable(c: f64) -> bool {
    c != 0.0 && c.is_finite()
}

/// Normalize one record, or `None` when either coordinate is zero or unparsable.
pub fn normalize_marker(record: &Value) -> Option<Marker> {
    let lat = coordinate(record, LAT_KEYS);
    let lng = coordinate(record, LNG_KEYS);
    if !usable(lat) || !usable(lng) {
        return None;
    }

    Some(Marker {
        id: first_present(record, ID_KEYS).and_then(MarkerId::from_value),
        title: first_string(record, TITLE_KEYS).unwrap_or_else(|| UNTITLED.to_string()),
        lat,
        lng,
        icon: first_present(record, ICON_KEYS).map(value_to_short_string),
        slug: first_string(record, SLUG_KEYS),
        category: first_present(record, CATEGORY_KEYS).cloned(),
        description: first_present(record, DESCRIPTION_KEYS).cloned(),
    })
}

/// Normalize a batch, keeping input order and dropping unusable records.
pub fn normalize_markers(records: &[Value]) -> Vec<Marker> {
    let markers: Vec<Marker> = records.iter().filter_map(normalize_marker).collect();
    if markers.len() < records.len() {
        tracing::debug!(dropped = records.len() - markers.len(), kept = markers.len(), "Dropped markers without coordinates");
    }
    markers
}

/// Extract the record list from an upstream payload.
///
/// Accepts a bare array or an `{items: [...]}` envelope. For the compact
/// feed, an item's `i` is a key into the payload's `icons` map; it is
/// replaced by that icon's URL (`icons[i].i`) so markers carry a usable icon.
pub fn records_from_payload(payload: &Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items.clone(),
        Value::Object(obj) => {
            let items = match obj.get("items") {
                Some(Value::Array(items)) => items,
                _ => return Vec::new(),
            };
            match obj.get("icons") {
                Some(Value::Object(icons)) => items.iter().map(|item| with_icon_url(item, icons)).collect(),
                // PHP encodes an empty icon map as `[]`
                Some(_) => {
                    let none = Map::new();
                    items.iter().map(|item| with_icon_url(item, &none)).collect()
                }
                None => items.clone(),
            }
        }
        _ => Vec::new(),
    }
}

fn with_icon_url(item: &Value, icons: &Map<String, Value>) -> Value {
    let mut item = item.clone();
    let key = item.get("i").filter(|v| is_truthy(v)).map(value_to_short_string);
    if let (Some(key), Some(obj)) = (key, item.as_object_mut()) {
        let url = icons.get(&key).and_then(|icon| icon.get("i")).cloned();
        obj.insert("i".to_string(), url.unwrap_or(Value::Null));
    }
    item
}
