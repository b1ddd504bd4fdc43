//! Bounded accumulation buffer for formatted records awaiting delivery.

use crate::otlp::LogRecord;

/// Overflow trips at this multiple of the configured batch size.
const OVERFLOW_MULTIPLIER: usize = 2;

/// What happened as a result of a push.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PushOutcome {
    /// The buffer hit twice the batch size and the oldest half was evicted.
    pub overflowed: bool,
    /// The buffer holds at least one full batch and should be flushed.
    pub flush_due: bool,
}

/// Insertion-ordered buffer bounded by the overflow guard.
///
/// The batch never refuses a record. Instead, when sustained delivery failure
/// lets the buffer reach twice the batch size, the oldest `max_size` entries
/// are shed so memory stays bounded while intake outpaces flushing.
#[derive(Debug)]
pub(crate) struct Batch {
    entries: Vec<LogRecord>,
    max_size: usize,
}

impl Batch {
    pub(crate) fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
        }
    }

    /// Append a record, applying the overflow guard before the full check.
    pub(crate) fn push(&mut self, entry: LogRecord) -> PushOutcome {
        self.entries.push(entry);

        let mut outcome = PushOutcome::default();
        if self.entries.len() >= self.max_size * OVERFLOW_MULTIPLIER {
            self.entries.drain(..self.max_size);
            outcome.overflowed = true;
        }
        outcome.flush_due = self.entries.len() >= self.max_size;
        outcome
    }

    /// Remove and return every buffered record, clearing unconditionally.
    pub(crate) fn take(&mut self) -> Vec<LogRecord> {
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    fn bodies(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|r| r.body.string_value.as_str())
            .collect()
    }
}
