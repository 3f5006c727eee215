//! # LogWriter: failure logger
//!
//! A minimal observer that writes every swallowed listener failure as a
//! `tracing` warning. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! WARN tinyemit::observers::log: listener failure seq=3 key=error index=1 label="listener_panicked" detail="panic: boom"
//! ```

use super::{ListenerFailure, Observe};

/// Failure writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Observe for LogWriter {
    fn on_failure(&self, failure: &ListenerFailure) {
        tracing::warn!(
            seq = failure.seq,
            key = %failure.key,
            index = failure.index,
            label = failure.error.as_label(),
            detail = %failure.error.as_message(),
            "listener failure"
        );
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
