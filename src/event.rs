//! Log event representation supplied by the host application.
//!
//! One [`LogEvent`] is produced per emitted log statement. The handler
//! formats it into the OTLP wire shape and never mutates it.

use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

use serde_json::Value;

use crate::level::Level;

/// A single structured log record emitted by the host application.
#[derive(Clone, Debug)]
pub struct LogEvent {
    /// Time the record was created.
    pub timestamp: SystemTime,
    /// Name of the channel (logger) that produced the record.
    pub channel: String,
    /// Severity of the record.
    pub level: Level,
    /// The log message content.
    pub message: String,
    /// Per-record context values. The keys `trace_id` and `span_id` are
    /// reserved and promoted to top-level correlation fields on the wire.
    pub context: BTreeMap<String, Value>,
    /// Values added by processors after the log call site.
    pub extra: BTreeMap<String, Value>,
}

impl LogEvent {
    /// Construct an event with empty context and extra maps.
    pub fn new(channel: &str, level: Level, message: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            channel: channel.to_owned(),
            level,
            message: message.to_owned(),
            context: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Construct an event carrying context values.
    pub fn with_context(
        channel: &str,
        level: Level,
        message: &str,
        context: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            context,
            ..Self::new(channel, level, message)
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.channel, self.level, self.message)
    }
}
