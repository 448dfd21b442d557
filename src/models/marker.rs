use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upstream ids are numbers on REST listings and either numbers or numeric
/// strings on the compact AJAX feed. Both are kept verbatim.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum MarkerId {
    Number(serde_json::Number),
    Text(String),
}

impl MarkerId {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(MarkerId::Number(n.clone())),
            Value::String(s) if !s.is_empty() => Some(MarkerId::Text(s.clone())),
            _ => None,
        }
    }

    /// Key used for deduplication; `1` and `"1"` stay distinct.
    pub fn merge_key(&self) -> String {
        match self {
            MarkerId::Number(n) => n.to_string(),
            MarkerId::Text(s) => format!("{:?}", s),
        }
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerId::Number(n) => write!(f, "{}", n),
            MarkerId::Text(s) => f.write_str(s),
        }
    }
}

/// A point of interest ready for the map. `lat` and `lng` are never zero.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: Option<MarkerId>,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl Marker {
    /// Stand-in shown when a region has no markers at all.
    pub fn placeholder(region_name: &str) -> Self {
        Marker {
            id: Some(MarkerId::Number(1.into())),
            title: format!("Sample Service in {}", region_name),
            lat: PLACEHOLDER_LAT,
            lng: PLACEHOLDER_LNG,
            icon: None,
            slug: None,
            category: None,
            description: None,
        }
    }
}

/// Geographic centre of Nigeria.
pub const PLACEHOLDER_LAT: f64 = 9.0820;
pub const PLACEHOLDER_LNG: f64 = 8.6753;
