use crate::domain::model::{DnsRecord, Zone};
use chrono::DateTime;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde_json::Value;

fn new_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

fn centered(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Center)
}

pub fn zones_table(zones: &[Zone]) -> Table {
    let mut table = new_table(vec!["No", "Domain", "Status", "Created On", "Zone ID"]);
    for (i, zone) in zones.iter().enumerate() {
        table.add_row(vec![
            centered(i + 1),
            Cell::new(&zone.name),
            Cell::new(&zone.status),
            centered(format_timestamp(&zone.created_on)),
            centered(&zone.id),
        ]);
    }
    table
}

pub fn dns_records_table(records: &[DnsRecord]) -> Table {
    let mut table = new_table(vec!["No", "ID", "Type", "Name", "Content", "TTL", "Proxied"]);
    for (i, record) in records.iter().enumerate() {
        table.add_row(vec![
            centered(i + 1),
            Cell::new(&record.id),
            Cell::new(&record.record_type),
            Cell::new(&record.name),
            Cell::new(display_value(&record.content)),
            centered(display_value(&record.ttl)),
            centered(display_value(&record.proxied)),
        ]);
    }
    table
}

pub fn nameservers_table(name_servers: &[String]) -> Table {
    let mut table = new_table(vec!["No", "Nameserver"]);
    for (i, ns) in name_servers.iter().enumerate() {
        table.add_row(vec![centered(i + 1), Cell::new(ns)]);
    }
    table
}

/// RFC 3339 timestamps are shortened to minutes; anything else is shown as-is.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-01-15T10:30:00.123456Z"), "2024-01-15 10:30");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("1.2.3.4")), "1.2.3.4");
        assert_eq!(display_value(&json!(300)), "300");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "");
    }

    #[test]
    fn test_records_table_contains_values() {
        let records = vec![DnsRecord {
            id: "r1".to_string(),
            record_type: "A".to_string(),
            name: "sub.example.com".to_string(),
            content: json!("1.2.3.4"),
            ttl: json!(1),
            proxied: json!(false),
        }];
        let rendered = dns_records_table(&records).to_string();
        assert!(rendered.contains("sub.example.com"));
        assert!(rendered.contains("1.2.3.4"));
        assert!(rendered.contains("Proxied"));
    }
}
