//! # Listener registry: ordered key → listener sequence mapping.
//!
//! The registry is plain data; the [`Emitter`](crate::Emitter) guards it with a
//! mutex and never calls a listener while holding it.
//!
//! ## Rules
//! - Keys keep insertion order (first registration of a key appends it).
//! - A key is present **iff** its sequence is non-empty: the slot is dropped as
//!   soon as its last listener is removed, and a later registration appends it
//!   again at the end.
//! - Entries are never deduplicated.
//! - Snapshots are copies: mutating the registry never affects a snapshot.

use crate::events::{ERROR, ERROR_MONITOR, EventKey};
use crate::listeners::Listener;

/// Listeners registered for one key.
struct Slot {
    key: EventKey,
    listeners: Vec<Listener>,
}

/// Ordered mapping from event key to listener sequence.
pub(crate) struct Registry {
    slots: Vec<Slot>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new() }
    }

    fn position(&self, key: &EventKey) -> Option<usize> {
        self.slots.iter().position(|slot| &slot.key == key)
    }

    fn listeners(&self, key: &EventKey) -> &[Listener] {
        match self.position(key) {
            Some(i) => self.slots[i].listeners.as_slice(),
            None => &[],
        }
    }

    fn listeners_mut_or_create(&mut self, key: EventKey) -> &mut Vec<Listener> {
        let i = match self.position(&key) {
            Some(i) => i,
            None => {
                self.slots.push(Slot {
                    key,
                    listeners: Vec::new(),
                });
                self.slots.len() - 1
            }
        };
        &mut self.slots[i].listeners
    }

    /// Adds `listener` to the end of `key`'s sequence.
    pub(crate) fn append(&mut self, key: EventKey, listener: Listener) {
        self.listeners_mut_or_create(key).push(listener);
    }

    /// Adds `listener` to the front of `key`'s sequence.
    pub(crate) fn prepend(&mut self, key: EventKey, listener: Listener) {
        self.listeners_mut_or_create(key).insert(0, listener);
    }

    /// Removes the first entry of `key` accepted by `pred` and returns it.
    ///
    /// Drops the key when its sequence becomes empty.
    pub(crate) fn remove_first<P>(&mut self, key: &EventKey, pred: P) -> Option<Listener>
    where
        P: Fn(&Listener) -> bool,
    {
        let i = self.position(key)?;
        let listeners = &mut self.slots[i].listeners;
        let at = listeners.iter().position(pred)?;
        let removed = listeners.remove(at);

        if listeners.is_empty() {
            self.slots.remove(i);
        }
        Some(removed)
    }

    /// Copy of `key`'s sequence (empty for unknown keys).
    pub(crate) fn snapshot(&self, key: &EventKey) -> Vec<Listener> {
        self.listeners(key).to_vec()
    }

    /// Copy of the listeners to invoke for an emission of `key`.
    ///
    /// For [`ERROR`] the [`ERROR_MONITOR`] listeners come first, in their own
    /// registration order.
    pub(crate) fn dispatch_snapshot(&self, key: &EventKey) -> Vec<Listener> {
        if key != &ERROR {
            return self.snapshot(key);
        }
        let monitors = self.listeners(&ERROR_MONITOR);
        let handlers = self.listeners(key);

        let mut out = Vec::with_capacity(monitors.len() + handlers.len());
        out.extend_from_slice(monitors);
        out.extend_from_slice(handlers);
        out
    }

    /// Registered keys in insertion order.
    pub(crate) fn keys(&self) -> Vec<EventKey> {
        self.slots.iter().map(|slot| slot.key.clone()).collect()
    }

    /// Number of entries for `key`, or of entries matching `listener`.
    pub(crate) fn count(&self, key: &EventKey, listener: Option<&Listener>) -> usize {
        let listeners = self.listeners(key);
        match listener {
            None => listeners.len(),
            Some(target) => listeners.iter().filter(|l| l.matches(target)).count(),
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
