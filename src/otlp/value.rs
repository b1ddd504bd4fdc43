//! Typed attribute values and the encoder from arbitrary JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder substituted when a composite value cannot be serialized.
const ENCODING_FAILED: &str = "[encoding failed]";

/// A typed OTLP attribute value.
///
/// Exactly one variant is populated; the externally tagged serde
/// representation produces the wire shape directly, e.g. `{"boolValue": true}`
/// or `{"intValue": "123"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// `{"boolValue": ...}`
    #[serde(rename = "boolValue")]
    Bool(bool),
    /// `{"intValue": "..."}` — 64-bit integers travel as strings.
    #[serde(rename = "intValue")]
    Int(String),
    /// `{"doubleValue": ...}`
    #[serde(rename = "doubleValue")]
    Double(f64),
    /// `{"stringValue": ...}`
    #[serde(rename = "stringValue")]
    String(String),
}

/// Encode an arbitrary context value as a typed attribute value.
///
/// Primitives map to their matching variant. Composite values (arrays and
/// objects) are carried as their JSON serialization in a string value; if
/// serialization fails the value degrades to a placeholder string rather
/// than propagating an error. `null` becomes the literal string `"null"`.
pub fn encode_value(value: &Value) -> AttributeValue {
    match value {
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) if n.is_i64() || n.is_u64() => AttributeValue::Int(n.to_string()),
        Value::Number(n) => AttributeValue::Double(n.as_f64().unwrap_or_default()),
        Value::String(s) => AttributeValue::String(s.clone()),
        Value::Array(_) | Value::Object(_) => AttributeValue::String(safe_json_encode(value)),
        Value::Null => AttributeValue::String("null".to_owned()),
    }
}

fn safe_json_encode(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| ENCODING_FAILED.to_owned())
}
