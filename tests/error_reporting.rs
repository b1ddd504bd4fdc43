//! Verifies that delivery failures surface through the side-channel `log`
//! reporter instead of reaching the host application.
//!
//! Kept in its own test binary because `logtest` installs a global logger.

use posthog_logs::{Config, DeliveryError, LogEvent, Level, PosthogHandler, Transport};

struct RefusingTransport;

impl Transport for RefusingTransport {
    fn post(&self, _endpoint: &str, _api_key: &str, _body: &str) -> Result<(), DeliveryError> {
        Err(DeliveryError::Status(500))
    }
}

#[test]
fn delivery_failure_is_logged_and_swallowed() {
    let mut logger = logtest::Logger::start();

    let config = Config {
        batch_max_size: 1,
        ..Config::with_api_key("phc_test")
    };
    let handler = PosthogHandler::builder(config)
        .transport(Box::new(RefusingTransport))
        .build()
        .expect("build handler");

    // Must not panic or propagate despite the failing transport.
    handler.handle(&LogEvent::new("app", Level::Error, "will fail"));
    drop(handler);

    let reported = logger.any(|record| {
        record.level() == log::Level::Error && record.args().contains("[posthog-logs]")
    });
    assert!(reported, "expected a side-channel error report");
}
