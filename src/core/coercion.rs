//! Loose-input coercion for DNS record payloads.
//!
//! None of these ever fail: a TTL that can't be read becomes `1` (automatic) and `proxied`
//! follows ordinary truthiness.

use crate::domain::model::{DnsRecordUpdate, NewDnsRecord};
use serde_json::{json, Map, Value};

pub const AUTOMATIC_TTL: i64 = 1;

pub fn normalize_record_type(record_type: &str) -> String {
    record_type.to_uppercase()
}

pub fn coerce_ttl(ttl: &Value) -> i64 {
    match ttl {
        // Values outside i64, including u64 above i64::MAX, get the automatic TTL.
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })
            .unwrap_or(AUTOMATIC_TTL),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(AUTOMATIC_TTL),
        Value::Bool(b) => i64::from(*b),
        _ => AUTOMATIC_TTL,
    }
}

pub fn coerce_proxied(proxied: &Value) -> bool {
    match proxied {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Interactive yes/no answers: only `true`, `1` and `yes` (any case) count as yes.
pub fn parse_yes_flag(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

pub fn new_record_payload(record: &NewDnsRecord) -> Value {
    json!({
        "type": normalize_record_type(&record.record_type),
        "name": record.name,
        "content": record.content,
        "ttl": coerce_ttl(&record.ttl),
        "proxied": coerce_proxied(&record.proxied),
    })
}

pub fn update_payload(update: &DnsRecordUpdate) -> Value {
    let mut payload = Map::new();

    if let Some(record_type) = &update.record_type {
        payload.insert("type".into(), Value::String(normalize_record_type(record_type)));
    }
    if let Some(name) = &update.name {
        payload.insert("name".into(), Value::String(name.clone()));
    }
    if let Some(content) = &update.content {
        payload.insert("content".into(), Value::String(content.clone()));
    }
    if let Some(ttl) = &update.ttl {
        payload.insert("ttl".into(), Value::from(coerce_ttl(ttl)));
    }
    if let Some(proxied) = &update.proxied {
        payload.insert("proxied".into(), Value::Bool(coerce_proxied(proxied)));
    }

    Value::Object(payload)
}
