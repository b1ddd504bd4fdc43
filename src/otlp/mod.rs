//! OTLP JSON wire format for logs.
//!
//! This module owns everything that appears on the wire: typed attribute
//! values, formatted log records, the static resource descriptor, and the
//! `resourceLogs` envelope posted to the ingestion endpoint.
//!
//! Field names follow the OTLP/JSON mapping (camelCase, 64-bit integers
//! encoded as strings to avoid precision loss in JSON numbers).

mod format;
mod payload;
mod record;
mod resource;
mod value;

pub use format::format_event;
pub use payload::{Payload, ResourceLogs, Scope, ScopeLogs};
pub use record::{Attribute, Body, LogRecord};
pub use resource::{FALLBACK_VERSION, Resource, SDK_NAME, build_resource, sdk_version};
pub use value::{AttributeValue, encode_value};
