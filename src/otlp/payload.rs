//! The `resourceLogs` envelope posted to the ingestion endpoint.

use serde::{Deserialize, Serialize};

use super::record::LogRecord;
use super::resource::{Resource, SDK_NAME, sdk_version};

/// Instrumentation scope identifying this forwarder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub name: String,
    pub version: String,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            name: SDK_NAME.to_owned(),
            version: sdk_version().to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeLogs {
    pub scope: Scope,
    pub log_records: Vec<LogRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLogs {
    pub resource: Resource,
    pub scope_logs: Vec<ScopeLogs>,
}

/// The complete wire-level payload. Built fresh at each flush from the static
/// resource descriptor and the current batch, sent, and discarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub resource_logs: Vec<ResourceLogs>,
}

impl Payload {
    /// Wrap a batch of records and a resource descriptor in the envelope.
    pub fn new(resource: Resource, log_records: Vec<LogRecord>) -> Self {
        Self {
            resource_logs: vec![ResourceLogs {
                resource,
                scope_logs: vec![ScopeLogs {
                    scope: Scope::default(),
                    log_records,
                }],
            }],
        }
    }

    /// Number of log records carried by the payload.
    pub fn record_count(&self) -> usize {
        self.resource_logs
            .iter()
            .flat_map(|r| &r.scope_logs)
            .map(|s| s.log_records.len())
            .sum()
    }
}
