//! Configuration smoke test.
//!
//! Builds one synthetic log event and pushes it through the same formatting
//! and transport path as real traffic, reporting success or failure to the
//! operator. Intended for wiring verification, not for the data path; it
//! runs even when forwarding is disabled so connectivity can be checked
//! before turning the handler on.

use serde_json::json;

use crate::config::{Config, validate_host};
use crate::error::DiagnosticError;
use crate::event::LogEvent;
use crate::level::Level;
use crate::otlp::{Payload, build_resource, format_event};
use crate::transport::{Transport, UreqTransport};

/// Channel name stamped on test records so they are easy to find.
const TEST_CHANNEL: &str = "posthog-test";

/// Send one test log record to the configured endpoint.
///
/// # Errors
///
/// Fails when no API key is configured, the host is invalid, or the POST
/// does not yield a 2xx response.
pub fn send_test_event(config: &Config, message: &str) -> Result<(), DiagnosticError> {
    let transport = UreqTransport::new(&config.http)?;
    send_test_event_with(config, message, &transport)
}

/// Same as [`send_test_event`] with a caller-supplied transport.
pub fn send_test_event_with(
    config: &Config,
    message: &str,
    transport: &dyn Transport,
) -> Result<(), DiagnosticError> {
    let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) else {
        return Err(DiagnosticError::MissingApiKey);
    };
    validate_host(&config.host)?;

    let mut event = LogEvent::new(TEST_CHANNEL, Level::Info, message);
    event.context.insert("test".to_owned(), json!(true));

    let payload = Payload::new(build_resource(config), vec![format_event(&event)]);
    let body = serde_json::to_string(&payload).map_err(crate::error::DeliveryError::from)?;
    transport.post(&config.endpoint(), api_key, &body)?;
    Ok(())
}
