//! Out-of-band delivery job executed by a queue worker.
//!
//! The job carries everything a worker needs to repeat the same HTTP POST the
//! synchronous path would have made, plus a bounded retry policy with a fixed
//! backoff schedule. Terminal failure is reported through the `log` crate and
//! never propagates back to the thread that emitted the records.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::HttpSettings;
use crate::error::DeliveryError;
use crate::otlp::Payload;
use crate::transport::{Transport, UreqTransport};

/// Maximum delivery attempts per job.
pub const MAX_ATTEMPTS: usize = 3;

/// Fixed backoff slept before each retry.
pub const BACKOFF_SCHEDULE: [Duration; 2] = [Duration::from_secs(1), Duration::from_secs(5)];

/// A queued request to deliver one payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeliveryJob {
    /// Target queue name, recorded for routing and diagnostics.
    pub queue: String,
    /// Full ingestion endpoint URL.
    pub endpoint: String,
    /// Bearer token for the request.
    pub api_key: String,
    /// The envelope to send, identical to the synchronous path's.
    pub payload: Payload,
    /// HTTP settings the worker must honour.
    pub http: HttpSettings,
}

impl DeliveryJob {
    /// Run the job with a transport built from its own HTTP settings.
    pub fn run(&self) -> Result<(), DeliveryError> {
        let transport = UreqTransport::new(&self.http)?;
        self.run_with(&transport)
    }

    /// Run the job against a caller-supplied transport.
    ///
    /// Attempts the POST up to [`MAX_ATTEMPTS`] times, sleeping through the
    /// fixed [`BACKOFF_SCHEDULE`] between attempts. Returns the last error if
    /// every attempt fails.
    pub fn run_with(&self, transport: &dyn Transport) -> Result<(), DeliveryError> {
        self.run_with_sleeper(transport, thread::sleep)
    }

    fn run_with_sleeper(
        &self,
        transport: &dyn Transport,
        sleep: impl Fn(Duration),
    ) -> Result<(), DeliveryError> {
        let body = serde_json::to_string(&self.payload)?;

        let mut attempt = 1;
        loop {
            match transport.post(&self.endpoint, &self.api_key, &body) {
                Ok(()) => return Ok(()),
                Err(err) if attempt < MAX_ATTEMPTS => {
                    log::warn!(
                        "[posthog-logs] delivery attempt {attempt}/{MAX_ATTEMPTS} failed: {err}"
                    );
                    sleep(BACKOFF_SCHEDULE[attempt - 1]);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Terminal failure hook: record the error without propagating it.
    pub fn failed(&self, err: &DeliveryError) {
        log::error!(
            "[posthog-logs] queued delivery of {} log record(s) failed after {MAX_ATTEMPTS} attempts: {err}",
            self.payload.record_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::event::LogEvent;
    use crate::level::Level;
    use crate::otlp::{build_resource, format_event};
    use std::sync::Mutex;

    struct ScriptedTransport {
        results: Mutex<Vec<Result<(), DeliveryError>>>,
        calls: Mutex<usize>,
    }

    impl ScriptedTransport {
        fn new(results: Vec<Result<(), DeliveryError>>) -> Self {
            Self {
                results: Mutex::new(results),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().expect("lock")
        }
    }

    impl Transport for ScriptedTransport {
        fn post(&self, _endpoint: &str, _api_key: &str, _body: &str) -> Result<(), DeliveryError> {
            *self.calls.lock().expect("lock") += 1;
            let mut results = self.results.lock().expect("lock");
            if results.is_empty() {
                Ok(())
            } else {
                results.remove(0)
            }
        }
    }

    fn job() -> DeliveryJob {
        let config = Config::with_api_key("phc_test");
        let records = vec![format_event(&LogEvent::new("test", Level::Info, "hi"))];
        DeliveryJob {
            queue: "posthog-logs".to_owned(),
            endpoint: config.endpoint(),
            api_key: "phc_test".to_owned(),
            payload: Payload::new(build_resource(&config), records),
            http: config.http,
        }
    }

    fn run_recording_sleeps(
        job: &DeliveryJob,
        transport: &ScriptedTransport,
    ) -> (Result<(), DeliveryError>, Vec<Duration>) {
        let slept = Mutex::new(Vec::new());
        let result = job.run_with_sleeper(transport, |d| slept.lock().expect("lock").push(d));
        let slept = slept.into_inner().expect("lock");
        (result, slept)
    }

    #[test]
    fn succeeds_on_first_attempt_without_retrying() {
        let transport = ScriptedTransport::new(vec![Ok(())]);
        let (result, slept) = run_recording_sleeps(&job(), &transport);
        assert!(result.is_ok());
        assert_eq!(transport.calls(), 1);
        assert!(slept.is_empty());
    }

    #[test]
    fn stops_after_the_attempt_limit() {
        let transport = ScriptedTransport::new(vec![
            Err(DeliveryError::Status(503)),
            Err(DeliveryError::Status(503)),
            Err(DeliveryError::Status(503)),
        ]);
        let (result, slept) = run_recording_sleeps(&job(), &transport);
        assert!(matches!(result, Err(DeliveryError::Status(503))));
        assert_eq!(transport.calls(), MAX_ATTEMPTS);
        assert_eq!(slept, BACKOFF_SCHEDULE.to_vec());
    }

    #[test]
    fn recovers_when_a_retry_succeeds() {
        let transport = ScriptedTransport::new(vec![Err(DeliveryError::Status(500)), Ok(())]);
        let (result, slept) = run_recording_sleeps(&job(), &transport);
        assert!(result.is_ok());
        assert_eq!(transport.calls(), 2);
        assert_eq!(slept, vec![BACKOFF_SCHEDULE[0]]);
    }

    #[test]
    fn job_round_trips_through_serde() {
        let original = job();
        let json = serde_json::to_string(&original).expect("serialize");
        let parsed: DeliveryJob = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed.queue, original.queue);
        assert_eq!(parsed.endpoint, original.endpoint);
        assert_eq!(parsed.payload, original.payload);
        assert_eq!(parsed.http, original.http);
    }
}
