//! Async delivery queue seam and the channel-backed default.
//!
//! The handler only ever enqueues; the host owns the consuming side and can
//! drain it with [`spawn_worker`] or its own worker loop.

use std::thread;

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};

use crate::error::QueueError;
use crate::job::DeliveryJob;

/// Default bounded capacity for [`ChannelQueue`].
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// An opaque enqueue target for out-of-band delivery.
///
/// Enqueueing must never block the emitting thread; a full or broken backend
/// returns an error and the dispatcher falls back to synchronous delivery.
pub trait DeliveryQueue: Send + Sync {
    /// Hand a job to the queue backend.
    fn enqueue(&self, job: DeliveryJob) -> Result<(), QueueError>;
}

/// In-process queue over a bounded crossbeam channel.
pub struct ChannelQueue {
    tx: Sender<DeliveryJob>,
}

impl ChannelQueue {
    /// Create a queue and the receiver the host's worker should drain.
    pub fn bounded(capacity: usize) -> (Self, Receiver<DeliveryJob>) {
        let (tx, rx) = bounded(capacity);
        (Self { tx }, rx)
    }
}

impl DeliveryQueue for ChannelQueue {
    fn enqueue(&self, job: DeliveryJob) -> Result<(), QueueError> {
        match self.tx.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(QueueError::Full),
            Err(TrySendError::Disconnected(_)) => Err(QueueError::Closed),
        }
    }
}

/// Spawn a worker thread that drains queued jobs until the channel closes.
///
/// Each job runs with its own retry policy; exhausted retries invoke the
/// job's terminal failure hook so errors are recorded without reaching the
/// emitting threads.
pub fn spawn_worker(rx: Receiver<DeliveryJob>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for job in rx {
            if let Err(err) = job.run() {
                job.failed(&err);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::otlp::{Payload, build_resource};

    fn job() -> DeliveryJob {
        let config = Config::with_api_key("phc_test");
        DeliveryJob {
            queue: "posthog-logs".to_owned(),
            endpoint: config.endpoint(),
            api_key: "phc_test".to_owned(),
            payload: Payload::new(build_resource(&config), Vec::new()),
            http: config.http,
        }
    }

    #[test]
    fn enqueue_delivers_to_the_receiver() {
        let (queue, rx) = ChannelQueue::bounded(4);
        queue.enqueue(job()).expect("enqueue");
        let received = rx.try_recv().expect("job available");
        assert_eq!(received.queue, "posthog-logs");
    }

    #[test]
    fn full_queue_reports_full() {
        let (queue, _rx) = ChannelQueue::bounded(1);
        queue.enqueue(job()).expect("first enqueue");
        assert_eq!(queue.enqueue(job()), Err(QueueError::Full));
    }

    #[test]
    fn dropped_receiver_reports_closed() {
        let (queue, rx) = ChannelQueue::bounded(1);
        drop(rx);
        assert_eq!(queue.enqueue(job()), Err(QueueError::Closed));
    }
}
