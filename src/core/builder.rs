use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{Emitter, EmitterConfig, Shared, registry::Registry};
use crate::observers::Observe;

/// Builder for constructing an [`Emitter`] with optional failure observers.
pub struct EmitterBuilder {
    cfg: EmitterConfig,
    observers: Vec<Arc<dyn Observe>>,
}

impl EmitterBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: EmitterConfig) -> Self {
        Self {
            cfg,
            observers: Vec::new(),
        }
    }

    /// Sets observers for swallowed listener failures.
    ///
    /// Observers are called inline from `emit`, in the given order, once per
    /// failed listener invocation.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        self.observers = observers;
        self
    }

    /// Builds and returns the Emitter instance with an empty registry.
    pub fn build(self) -> Emitter {
        tracing::trace!(
            emit_emitter_events = self.cfg.emit_emitter_events,
            observers = self.observers.len(),
            "emitter created"
        );
        Emitter::from_shared(Arc::new(Shared {
            registry: Mutex::new(Registry::new()),
            cfg: self.cfg,
            observers: self.observers,
        }))
    }
}
