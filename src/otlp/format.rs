//! Conversion from a host log event to a formatted OTLP record.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use super::record::{Attribute, Body, LogRecord};
use super::value::encode_value;
use crate::event::LogEvent;

/// Context keys promoted to top-level correlation fields instead of being
/// encoded as generic attributes.
const RESERVED_KEYS: &[&str] = &["trace_id", "span_id"];

/// Format a log event as an OTLP log record.
///
/// Pure and total: any well-formed event yields a record. Both timestamp
/// fields carry the same event time since the forwarder does not track a
/// separate ingestion time.
pub fn format_event(event: &LogEvent) -> LogRecord {
    let timestamp = unix_nanos(event.timestamp).to_string();
    let (severity_number, severity_text) = event.level.severity();

    let mut attributes = encode_attributes(&event.context, "");
    attributes.extend(encode_attributes(&event.extra, "extra."));
    attributes.push(Attribute::new(
        "log.channel",
        encode_value(&Value::String(event.channel.clone())),
    ));

    LogRecord {
        observed_time_unix_nano: timestamp.clone(),
        time_unix_nano: timestamp,
        severity_number,
        severity_text: severity_text.to_owned(),
        body: Body {
            string_value: event.message.clone(),
        },
        attributes,
        trace_id: correlation_field(&event.context, "trace_id"),
        span_id: correlation_field(&event.context, "span_id"),
    }
}

fn unix_nanos(timestamp: SystemTime) -> u128 {
    timestamp
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

/// Encode a context map as attributes, skipping the reserved correlation keys.
fn encode_attributes(values: &BTreeMap<String, Value>, prefix: &str) -> Vec<Attribute> {
    values
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| Attribute::new(format!("{prefix}{key}"), encode_value(value)))
        .collect()
}

fn correlation_field(context: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    context.get(key).map(|value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
