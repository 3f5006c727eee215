//! # Observe: hook for swallowed listener failures
//!
//! Dispatch discards every listener failure. The [`Observe`] trait is the opt-in
//! way to see them anyway: each failure is handed to every attached observer as a
//! [`ListenerFailure`], synchronously, right after the failing listener returned.
//!
//! ```text
//! emit(key, args)
//!   └─► listener.call(args) ── Err / panic ──► ListenerFailure
//!                                                  │
//!                  ┌───────────────────────────────┼──────────────────┐
//!                  ▼                               ▼                  ▼
//!              LogWriter                     MetricsObserver     CustomObserver
//!           (tracing::warn!)                  (counters)         (user logic)
//! ```
//!
//! Without observers failures are silent.
//!
//! # Example: custom observer
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use tinyemit::{args, Emitter, EmitterConfig, Listener, ListenerFailure, Observe};
//!
//! #[derive(Default)]
//! struct FailureCounter(AtomicUsize);
//!
//! impl Observe for FailureCounter {
//!     fn on_failure(&self, _failure: &ListenerFailure) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//!     fn name(&self) -> &'static str { "failure-counter" }
//! }
//!
//! let counter = Arc::new(FailureCounter::default());
//! let emitter = Emitter::builder(EmitterConfig::default())
//!     .with_observers(vec![counter.clone() as Arc<dyn Observe>])
//!     .build();
//!
//! emitter.on("job", Listener::new(|_| panic!("boom")));
//! assert!(emitter.emit("job", args![]));
//! assert_eq!(counter.0.load(Ordering::Relaxed), 1);
//! ```

use super::ListenerFailure;

/// # Receiver of listener failures swallowed by dispatch.
///
/// ### Implementation requirements
/// - Called inline from `emit`: keep it quick.
/// - Do not panic; an observer panic is not isolated.
/// - Calling back into the emitter is allowed (no lock is held).
pub trait Observe: Send + Sync + 'static {
    /// Called once per failed listener invocation.
    fn on_failure(&self, failure: &ListenerFailure);

    /// Returns the observer name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
