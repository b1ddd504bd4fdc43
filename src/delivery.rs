//! Delivery engine: wraps a batch in the wire envelope and ships it.

use std::sync::Arc;

use crate::config::HttpSettings;
use crate::job::DeliveryJob;
use crate::otlp::{LogRecord, Payload, Resource};
use crate::queue::DeliveryQueue;
use crate::transport::Transport;

/// An async queue target bound to its configured name.
pub(crate) struct QueueBinding {
    pub(crate) name: String,
    pub(crate) backend: Arc<dyn DeliveryQueue>,
}

/// Transmits batches of formatted records as single HTTP payloads.
///
/// Mode selection is fixed at construction: with a queue binding the payload
/// is enqueued for out-of-band delivery, otherwise it is posted in line.
/// Nothing here ever returns an error to the caller; failures are reported
/// through the `log` crate and the batch is dropped.
pub(crate) struct Dispatcher {
    endpoint: String,
    api_key: String,
    http: HttpSettings,
    resource: Resource,
    queue: Option<QueueBinding>,
    transport: Box<dyn Transport>,
}

impl Dispatcher {
    pub(crate) fn new(
        endpoint: String,
        api_key: String,
        http: HttpSettings,
        resource: Resource,
        queue: Option<QueueBinding>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            endpoint,
            api_key,
            http,
            resource,
            queue,
            transport,
        }
    }

    /// Deliver a batch. No-op on empty input.
    pub(crate) fn send(&self, records: Vec<LogRecord>) {
        if records.is_empty() {
            return;
        }

        let payload = Payload::new(self.resource.clone(), records);
        match &self.queue {
            Some(binding) => self.dispatch_to_queue(binding, payload),
            None => self.send_sync(&payload),
        }
    }

    /// Enqueue for out-of-band delivery, degrading to a blocking send when
    /// the queue backend refuses the job. Delivery is never silently lost to
    /// a broken queue.
    fn dispatch_to_queue(&self, binding: &QueueBinding, payload: Payload) {
        let job = DeliveryJob {
            queue: binding.name.clone(),
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            payload,
            http: self.http.clone(),
        };

        if let Err(err) = binding.backend.enqueue(job.clone()) {
            log::error!("[posthog-logs] queue dispatch failed, sending sync: {err}");
            self.send_sync(&job.payload);
        }
    }

    /// One POST attempt, no retry: synchronous delivery must never add
    /// meaningful latency to the emitting thread.
    fn send_sync(&self, payload: &Payload) {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(err) => {
                log::error!("[posthog-logs] failed to serialize payload: {err}");
                return;
            }
        };

        if let Err(err) = self.transport.post(&self.endpoint, &self.api_key, &body) {
            log::error!(
                "[posthog-logs] failed to send {} log record(s): {err}",
                payload.record_count()
            );
        }
    }
}
