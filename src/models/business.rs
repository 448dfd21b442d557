use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::is_truthy;

/// Payload of `POST /api/businesses/submit`. Unknown fields are echoed back.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSubmission {
    #[serde(default)]
    pub business_name: Value,
    #[serde(default)]
    pub email: Value,
    #[serde(default)]
    pub phone: Value,
    #[serde(default)]
    pub address: Value,
    /// Echoed as sent; `[]` only when the key is absent.
    #[serde(default = "no_files")]
    pub uploaded_files: Value,
    /// Always set by the proxy. A client-sent `createdAt` lands in `extra`
    /// and is discarded by [`BusinessSubmission::stamped`].
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn no_files() -> Value {
    Value::Array(Vec::new())
}

impl BusinessSubmission {
    pub fn has_required_fields(&self) -> bool {
        [&self.business_name, &self.email, &self.phone, &self.address]
            .into_iter()
            .all(is_truthy)
    }

    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.extra.remove("createdAt");
        self.created_at = Some(now);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn required_fields_must_be_present_and_non_empty() {
        let full: BusinessSubmission = serde_json::from_value(json!({
            "businessName": "Mama Put",
            "email": "a@b.ng",
            "phone": "0800",
            "address": "1 Marina",
        }))
        .unwrap();
        assert!(full.has_required_fields());

        let blank_phone: BusinessSubmission = serde_json::from_value(json!({
            "businessName": "Mama Put",
            "email": "a@b.ng",
            "phone": "",
            "address": "1 Marina",
        }))
        .unwrap();
        assert!(!blank_phone.has_required_fields());

        let missing: BusinessSubmission = serde_json::from_value(json!({ "email": "a@b.ng" })).unwrap();
        assert!(!missing.has_required_fields());
    }

    #[test]
    fn extra_fields_round_trip_with_timestamp() {
        let sub: BusinessSubmission = serde_json::from_value(json!({
            "businessName": "Mama Put",
            "email": "a@b.ng",
            "phone": "0800",
            "address": "1 Marina",
            "slogan": "Hot food",
        }))
        .unwrap();
        let now = Utc::now();
        let out = serde_json::to_value(sub.stamped(now)).unwrap();
        assert_eq!(out["slogan"], "Hot food");
        assert_eq!(out["uploadedFiles"], json!([]));
        assert!(out["createdAt"].is_string());
    }

    #[test]
    fn loose_uploaded_files_pass_through() {
        let base = json!({
            "businessName": "Mama Put",
            "email": "a@b.ng",
            "phone": "0800",
            "address": "1 Marina",
        });
        for files in [json!(null), json!("logo.png"), json!(["a.png", "b.png"])] {
            let mut body = base.clone();
            body["uploadedFiles"] = files.clone();
            let sub: BusinessSubmission = serde_json::from_value(body).unwrap();
            assert!(sub.has_required_fields());
            let out = serde_json::to_value(sub.stamped(Utc::now())).unwrap();
            assert_eq!(out["uploadedFiles"], files);
        }
    }

    #[test]
    fn client_created_at_is_replaced() {
        let sub: BusinessSubmission = serde_json::from_value(json!({
            "businessName": "Mama Put",
            "email": "a@b.ng",
            "phone": "0800",
            "address": "1 Marina",
            "createdAt": "yesterday",
        }))
        .unwrap();
        assert!(sub.has_required_fields());

        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let stamped = sub.stamped(now);
        assert!(!stamped.extra.contains_key("createdAt"));
        let out = serde_json::to_value(stamped).unwrap();
        assert_eq!(out["createdAt"], "2025-03-01T12:00:00Z");
    }
}
