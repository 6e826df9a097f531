use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed response body, kept exactly as Cloudflare sent it.
///
/// Cloudflare wraps every result in `{success, result, errors, ...}`; the accessors below only
/// read that envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse {
    pub body: Value,
}

impl ApiResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    pub fn success(&self) -> bool {
        self.body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn errors(&self) -> &Value {
        self.body.get("errors").unwrap_or(&Value::Null)
    }

    pub fn result(&self) -> Option<&Value> {
        self.body.get("result").filter(|v| !v.is_null())
    }

    pub fn into_inner(self) -> Value {
        self.body
    }

    /// Zones from a `listZones` result; entries that don't look like zones are skipped.
    pub fn zones(&self) -> Vec<Zone> {
        self.result_items()
    }

    pub fn dns_records(&self) -> Vec<DnsRecord> {
        self.result_items()
    }

    pub fn zone(&self) -> Option<Zone> {
        self.result()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    fn result_items<T: for<'de> Deserialize<'de>>(&self) -> Vec<T> {
        match self.result() {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Read-only view of a zone for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created_on: String,
    pub name_servers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: Value,
    pub ttl: Value,
    pub proxied: Value,
}

/// Input for creating a record. `ttl` and `proxied` stay loosely typed until the payload is
/// built, where they go through the coercion rules in [`crate::core::coercion`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewDnsRecord {
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: Value,
    pub proxied: Value,
}

impl NewDnsRecord {
    pub fn new(
        record_type: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            content: content.into(),
            ttl: Value::from(1),
            proxied: Value::Bool(false),
        }
    }

    pub fn with_ttl(mut self, ttl: impl Into<Value>) -> Self {
        self.ttl = ttl.into();
        self
    }

    pub fn with_proxied(mut self, proxied: impl Into<Value>) -> Self {
        self.proxied = proxied.into();
        self
    }
}

/// Keys accepted by a record update. Anything else is dropped.
pub const UPDATABLE_RECORD_FIELDS: [&str; 5] = ["type", "name", "content", "ttl", "proxied"];

/// Partial update of a DNS record; `None` fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DnsRecordUpdate {
    pub record_type: Option<String>,
    pub name: Option<String>,
    pub content: Option<String>,
    pub ttl: Option<Value>,
    pub proxied: Option<Value>,
}

impl DnsRecordUpdate {
    /// Builds an update from loose `(key, value)` pairs, silently ignoring unknown keys.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut update = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "type" => update.record_type = Some(value_to_text(value)),
                "name" => update.name = Some(value_to_text(value)),
                "content" => update.content = Some(value_to_text(value)),
                "ttl" => update.ttl = Some(value),
                "proxied" => update.proxied = Some(value),
                other => tracing::debug!("Dropping unsupported record field '{}'", other),
            }
        }
        update
    }

    pub fn is_empty(&self) -> bool {
        self.record_type.is_none()
            && self.name.is_none()
            && self.content.is_none()
            && self.ttl.is_none()
            && self.proxied.is_none()
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_accessors() {
        let response = ApiResponse::new(json!({
            "success": false,
            "errors": [{"code": 1003, "message": "Invalid or missing zone id."}],
            "result": null
        }));

        assert!(!response.success());
        assert_eq!(response.errors()[0]["code"], 1003);
        assert!(response.result().is_none());
    }

    #[test]
    fn test_missing_success_counts_as_failure() {
        let response = ApiResponse::new(json!({"result": []}));
        assert!(!response.success());
    }

    #[test]
    fn test_zones_view_tolerates_missing_fields() {
        let response = ApiResponse::new(json!({
            "success": true,
            "result": [
                {"id": "z1", "name": "example.com", "status": "active",
                 "created_on": "2024-01-15T10:30:00Z",
                 "name_servers": ["ada.ns.cloudflare.com", "bob.ns.cloudflare.com"]},
                {"id": "z2", "name": "example.org"},
                "not-a-zone"
            ]
        }));

        let zones = response.zones();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].name_servers.len(), 2);
        assert_eq!(zones[1].status, "");
    }

    #[test]
    fn test_update_from_pairs_drops_unknown_keys() {
        let update = DnsRecordUpdate::from_pairs(vec![
            ("content", json!("5.6.7.8")),
            ("priority", json!(10)),
            ("comment", json!("hello")),
            ("ttl", json!("120")),
        ]);

        assert_eq!(update.content.as_deref(), Some("5.6.7.8"));
        assert_eq!(update.ttl, Some(json!("120")));
        assert!(update.record_type.is_none());
        assert!(update.proxied.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn test_new_record_defaults() {
        let record = NewDnsRecord::new("a", "sub.example.com", "1.2.3.4");
        assert_eq!(record.ttl, json!(1));
        assert_eq!(record.proxied, json!(false));
    }
}
