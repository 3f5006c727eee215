//! # Listener failure record.
//!
//! [`ListenerFailure`] describes one swallowed failure: which key was being
//! emitted and what went wrong.
//!
//! ## Ordering guarantees
//! Each failure has a globally unique sequence number (`seq`) that increases
//! monotonically across all emitters in the process.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::error::ListenerError;
use crate::events::EventKey;

/// Global sequence counter for failure ordering.
static FAILURE_SEQ: AtomicU64 = AtomicU64::new(0);

/// A listener failure caught during dispatch.
#[derive(Clone, Debug)]
pub struct ListenerFailure {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Key being emitted when the listener failed.
    pub key: EventKey,
    /// Position of the failing listener in the dispatch snapshot.
    pub index: usize,
    /// What went wrong.
    pub error: ListenerError,
}

impl ListenerFailure {
    /// Creates a failure record with current timestamp and next sequence number.
    pub fn new(key: EventKey, index: usize, error: ListenerError) -> Self {
        Self {
            seq: FAILURE_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            key,
            index,
            error,
        }
    }

    #[inline]
    pub fn is_panic(&self) -> bool {
        self.error.is_panic()
    }
}
