//! Error types for construction, delivery, and queueing.
//!
//! Only [`ConfigError`] ever reaches the host application, and only at
//! construction time. Everything else is reported through the `log` crate and
//! swallowed so the forwarder can never disturb the caller's control flow.

use thiserror::Error;

/// Fatal configuration problems detected when building a handler.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Prefixing the host with `https://` did not parse as a URL.
    #[error("invalid PostHog host: {0}")]
    InvalidHost(String),
    /// The host contains characters that would allow path, query, fragment,
    /// or script injection.
    #[error("invalid characters in PostHog host: {0}")]
    InvalidHostCharacters(String),
    /// A queue target was configured but no queue backend was supplied.
    #[error("queue target `{0}` configured without a queue backend")]
    MissingQueueBackend(String),
    /// The TLS connector for the HTTP transport could not be initialised.
    #[error("TLS initialisation failed: {0}")]
    Tls(String),
}

/// Failures while shipping a payload to the ingestion endpoint.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Connection, DNS, or I/O failure before a response was received.
    #[error("transport error: {0}")]
    Transport(String),
    /// The endpoint answered with a non-2xx status.
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// The payload could not be serialized to JSON.
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The TLS connector for a per-job transport could not be initialised.
    #[error("TLS initialisation failed: {0}")]
    Tls(String),
}

/// Failures while handing a delivery job to the async queue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The queue is at capacity.
    #[error("delivery queue is full")]
    Full,
    /// The queue backend has shut down.
    #[error("delivery queue is closed")]
    Closed,
}

/// Failures surfaced by the configuration smoke test.
#[derive(Debug, Error)]
pub enum DiagnosticError {
    /// No API key is configured, so there is nothing to test.
    #[error("no API key configured")]
    MissingApiKey,
    /// The configured host failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The test record could not be delivered.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
