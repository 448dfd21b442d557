use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A state of the target country as the upstream knows it.
///
/// `id` is `None` for regions synthesized locally (static map or fallback).
/// After resolution `name` is the value to put in upstream `region=` params.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Region {
    pub id: Option<i64>,
    pub name: String,
    pub slug: String,
}

impl Region {
    pub fn synthetic(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Region {
            id: None,
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// Entry of `GET /api/regions`: the upstream row untouched plus a thumbnail.
#[derive(Serialize, Clone, Debug)]
pub struct RegionSummary {
    #[serde(flatten)]
    pub upstream: Map<String, Value>,
    pub thumbnail: Option<String>,
    pub credit: Option<super::Credit>,
}
