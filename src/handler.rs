//! The log-forwarding handler tying the pipeline together.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::batch::Batch;
use crate::config::{Config, validate_host};
use crate::delivery::{Dispatcher, QueueBinding};
use crate::error::ConfigError;
use crate::event::LogEvent;
use crate::otlp::{build_resource, format_event};
use crate::queue::DeliveryQueue;
use crate::transport::{Transport, UreqTransport};

/// Forwards structured log events to PostHog's log ingestion endpoint.
///
/// One handler instance owns one batch. Formatting and batch mutation happen
/// in line with the emitting call; the only network work on the emitting
/// thread is the bounded synchronous POST (or the queue handoff in async
/// mode). Nothing after construction ever panics or raises into the host.
///
/// The host must call [`close`](Self::close) (or rely on drop) at shutdown so
/// a partially filled batch is not silently lost.
pub struct PosthogHandler {
    config: Config,
    dispatcher: Dispatcher,
    batch: Mutex<Batch>,
}

/// Builder wiring optional collaborators into a [`PosthogHandler`].
pub struct HandlerBuilder {
    config: Config,
    queue_backend: Option<Arc<dyn DeliveryQueue>>,
    transport: Option<Box<dyn Transport>>,
}

impl HandlerBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            queue_backend: None,
            transport: None,
        }
    }

    /// Supply the queue backend used when the configuration names an async
    /// delivery queue. Ignored when no queue target is configured.
    pub fn queue_backend(mut self, backend: Arc<dyn DeliveryQueue>) -> Self {
        self.queue_backend = Some(backend);
        self
    }

    /// Replace the HTTP transport. Intended for tests and embedders that
    /// need to intercept outbound requests.
    pub fn transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the configuration and construct the handler.
    ///
    /// # Errors
    ///
    /// Fails fast on a malformed host, on a configured queue target without a
    /// backend, or when the TLS connector cannot be initialised. No handler
    /// exists on error, so these can never surface at runtime.
    pub fn build(self) -> Result<PosthogHandler, ConfigError> {
        validate_host(&self.config.host)?;

        let queue = match (&self.config.queue, self.queue_backend) {
            (Some(name), Some(backend)) => Some(QueueBinding {
                name: name.clone(),
                backend,
            }),
            (Some(name), None) => return Err(ConfigError::MissingQueueBackend(name.clone())),
            (None, _) => None,
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(
                UreqTransport::new(&self.config.http)
                    .map_err(|err| ConfigError::Tls(err.to_string()))?,
            ),
        };

        let dispatcher = Dispatcher::new(
            self.config.endpoint(),
            self.config.api_key.clone().unwrap_or_default(),
            self.config.http.clone(),
            build_resource(&self.config),
            queue,
            transport,
        );

        let batch = Mutex::new(Batch::new(self.config.batch_max_size));
        Ok(PosthogHandler {
            config: self.config,
            dispatcher,
            batch,
        })
    }
}

impl PosthogHandler {
    /// Construct a handler with the default HTTP transport and no queue
    /// backend. Use [`builder`](Self::builder) to wire in collaborators.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        HandlerBuilder::new(config).build()
    }

    pub fn builder(config: Config) -> HandlerBuilder {
        HandlerBuilder::new(config)
    }

    /// Accept one log event from the host's logging facade.
    ///
    /// Returns immediately, before any formatting, when the handler is
    /// disabled, no API key is configured, or the event is below the minimum
    /// level. All delivery failures are swallowed and reported through the
    /// `log` crate; this method never raises into the caller.
    pub fn handle(&self, event: &LogEvent) {
        if !self.config.enabled || !self.config.has_api_key() {
            return;
        }
        if event.level < self.config.level {
            return;
        }

        let record = format_event(event);

        if self.config.batch_max_size == 0 {
            self.dispatcher.send(vec![record]);
            return;
        }

        // Append, evict, and full-check form one critical section so
        // concurrent emitters cannot lose records or double-flush. The
        // network send happens after the lock is released.
        let due = {
            let mut batch = self.batch.lock();
            let outcome = batch.push(record);
            if outcome.overflowed {
                log::warn!(
                    "[posthog-logs] batch overflow: dropped oldest log records due to send failures"
                );
            }
            outcome.flush_due.then(|| batch.take())
        };

        if let Some(records) = due {
            self.dispatcher.send(records);
        }
    }

    /// Hand the entire buffered batch to the delivery engine.
    ///
    /// The batch is cleared unconditionally, whether or not delivery
    /// succeeds: delivery is at-most-once, best-effort.
    pub fn flush(&self) {
        let records = self.batch.lock().take();
        self.dispatcher.send(records);
    }

    /// Flush any buffered records at shutdown. Safe to call more than once;
    /// flushing an empty batch is a no-op.
    pub fn close(&self) {
        self.flush();
    }

    /// Records currently buffered and awaiting a flush.
    pub fn pending(&self) -> usize {
        self.batch.lock().len()
    }
}

impl Drop for PosthogHandler {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for PosthogHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosthogHandler")
            .field("host", &self.config.host)
            .field("enabled", &self.config.enabled)
            .field("batch_max_size", &self.config.batch_max_size)
            .field("queue", &self.config.queue)
            .finish()
    }
}
