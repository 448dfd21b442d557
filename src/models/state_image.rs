use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Credit {
    pub name: Option<String>,
    pub link: Option<String>,
}

/// Thumbnail for a region, as cached by [`crate::services::ImageCache`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateImage {
    pub url: Option<String>,
    pub credit: Option<Credit>,
    pub last_fetched: DateTime<Utc>,
}

impl StateImage {
    pub fn empty(now: DateTime<Utc>) -> Self {
        StateImage {
            url: None,
            credit: None,
            last_fetched: now,
        }
    }
}
