//! The formatted log record as it appears inside `logRecords`.

use serde::{Deserialize, Serialize};

use super::value::AttributeValue;

/// A single key/value attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// The record body. PostHog accepts only string bodies, so every message is
/// wrapped as `{"stringValue": ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(rename = "stringValue")]
    pub string_value: String,
}

/// One formatted log entry, immutable once built.
///
/// Timestamps are nanosecond Unix times encoded as strings (the OTLP/JSON
/// convention for 64-bit integers). `trace_id`/`span_id` are present only when
/// the emitting context carried them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub time_unix_nano: String,
    pub observed_time_unix_nano: String,
    pub severity_number: i32,
    pub severity_text: String,
    pub body: Body,
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case_without_absent_correlation() {
        let record = LogRecord {
            time_unix_nano: "1000".to_owned(),
            observed_time_unix_nano: "1000".to_owned(),
            severity_number: 9,
            severity_text: "INFO".to_owned(),
            body: Body {
                string_value: "hello".to_owned(),
            },
            attributes: vec![Attribute::new("k", AttributeValue::Bool(true))],
            trace_id: None,
            span_id: None,
        };

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            json,
            json!({
                "timeUnixNano": "1000",
                "observedTimeUnixNano": "1000",
                "severityNumber": 9,
                "severityText": "INFO",
                "body": {"stringValue": "hello"},
                "attributes": [{"key": "k", "value": {"boolValue": true}}],
            })
        );
    }

    #[test]
    fn correlation_fields_use_camel_case() {
        let record = LogRecord {
            time_unix_nano: "1".to_owned(),
            observed_time_unix_nano: "1".to_owned(),
            severity_number: 5,
            severity_text: "DEBUG".to_owned(),
            body: Body {
                string_value: String::new(),
            },
            attributes: Vec::new(),
            trace_id: Some("abc123".to_owned()),
            span_id: Some("def456".to_owned()),
        };

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["traceId"], "abc123");
        assert_eq!(json["spanId"], "def456");
    }
}
