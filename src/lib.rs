//! Forward structured log records to PostHog's log ingestion endpoint.
//!
//! [`PosthogHandler`] accepts one [`LogEvent`] per emitted log statement,
//! formats it as an OTLP/JSON log record, accumulates records in a bounded
//! batch, and ships each batch as a single `POST https://{host}/i/v1/logs`.
//!
//! Delivery is best-effort and at-most-once: a batch is handed to the
//! delivery engine exactly once and dropped whatever the outcome. Failures
//! never propagate into the host application; they are reported through the
//! `log` crate so the forwarder cannot recurse into itself. The only fatal
//! error is an invalid configuration at construction time.
//!
//! # Delivery modes
//!
//! - **Synchronous** (default): one bounded-timeout POST from the emitting
//!   thread, no retries.
//! - **Asynchronous**: configure a queue target and supply a
//!   [`DeliveryQueue`] backend; batches become [`DeliveryJob`]s drained by a
//!   host-owned worker with its own retry policy. If enqueueing fails the
//!   payload degrades to one synchronous send instead of being lost.
//!
//! # Shutdown
//!
//! Call [`PosthogHandler::close`] (or drop the handler) when the host shuts
//! down so a partially filled batch is flushed.

mod batch;
pub mod config;
mod delivery;
pub mod diagnostics;
mod error;
mod event;
mod handler;
mod job;
mod level;
pub mod otlp;
pub mod queue;
mod transport;

pub use config::{Config, HttpSettings};
pub use error::{ConfigError, DeliveryError, DiagnosticError, QueueError};
pub use event::LogEvent;
pub use handler::{HandlerBuilder, PosthogHandler};
pub use job::DeliveryJob;
pub use level::Level;
pub use queue::{ChannelQueue, DeliveryQueue};
pub use transport::{Transport, UreqTransport};
