//! # Emitter: registration, removal, introspection and synchronous dispatch.
//!
//! [`Emitter`] is a cheaply clonable handle to one listener registry. Clones
//! share the registry, so a listener may capture a clone and call back into the
//! emitter while it is being dispatched.
//!
//! ## Dispatch
//! ```text
//! emit(key, args)
//!     │
//!     ├─► lock ─► snapshot = [ERROR_MONITOR listeners if key == ERROR] ++ key's listeners ─► unlock
//!     │
//!     ├─► snapshot[0].call(&args) ──► Err / panic ──► observers (if any), otherwise dropped
//!     ├─► snapshot[1].call(&args)
//!     └─► snapshot[N].call(&args)
//!
//! returns !snapshot.is_empty()
//! ```
//!
//! ## Rules
//! - **Snapshot isolation**: registrations and removals made while an emission is
//!   in flight only affect later emissions.
//! - **Fault isolation**: a failing listener never aborts the emission and never
//!   reaches the caller of `emit`.
//! - **No lock across calls**: the registry lock is only held to mutate or copy;
//!   listeners, meta-event handlers and observers run unlocked.
//! - **Meta-events**: with `emit_emitter_events` set, every registration emits
//!   `newListener` and every actual removal emits `removeListener`, both with
//!   `[key, listener]` and both before the mutating call returns.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use tinyemit::{args, Emitter, Listener};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let emitter = Emitter::new();
//!
//! let s = seen.clone();
//! let f = Listener::new(move |a| s.lock().push(("f", *a.get::<i32>(0).unwrap())));
//! let s = seen.clone();
//! let g = Listener::new(move |a| s.lock().push(("g", *a.get::<i32>(0).unwrap())));
//!
//! emitter.on("x", f.clone()).on("x", g);
//! assert!(emitter.emit("x", args![1i32]));
//! assert_eq!(*seen.lock(), vec![("f", 1), ("g", 1)]);
//!
//! emitter.remove_listener("x", &f);
//! assert_eq!(emitter.listener_count("x", None), 1);
//!
//! emitter.remove_all_listeners(None);
//! assert!(emitter.event_names().is_empty());
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::core::{EmitterBuilder, EmitterConfig, registry::Registry};
use crate::error::ListenerError;
use crate::events::{Args, EventKey, NEW_LISTENER, REMOVE_LISTENER};
use crate::listeners::{Listener, once_adapter};
use crate::observers::{ListenerFailure, Observe};

/// State shared by all clones of one emitter.
pub(crate) struct Shared {
    pub(crate) registry: Mutex<Registry>,
    pub(crate) cfg: EmitterConfig,
    pub(crate) observers: Vec<Arc<dyn Observe>>,
}

/// Where a new entry goes in its key's sequence.
#[derive(Clone, Copy)]
enum Placement {
    Back,
    Front,
}

/// Synchronous event emitter.
///
/// All registration and removal methods return `&Self` for chaining.
#[derive(Clone)]
pub struct Emitter {
    shared: Arc<Shared>,
}

impl Emitter {
    /// Creates an emitter with the default configuration and no observers.
    pub fn new() -> Self {
        Self::builder(EmitterConfig::default()).build()
    }

    /// Creates an emitter with the given configuration and no observers.
    pub fn with_config(cfg: EmitterConfig) -> Self {
        Self::builder(cfg).build()
    }

    /// Returns a builder to attach failure observers.
    pub fn builder(cfg: EmitterConfig) -> EmitterBuilder {
        EmitterBuilder::new(cfg)
    }

    #[inline]
    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<Shared> {
        Arc::downgrade(&self.shared)
    }

    /// Configuration fixed at construction.
    #[inline]
    pub fn config(&self) -> &EmitterConfig {
        &self.shared.cfg
    }

    // ---- Registration ----

    /// Appends `listener` to `key`'s listeners.
    ///
    /// No deduplication: registering the same listener twice yields two entries,
    /// both invoked and each removable on its own.
    pub fn on(&self, key: impl Into<EventKey>, listener: Listener) -> &Self {
        self.register(key.into(), listener, Placement::Back, false);
        self
    }

    /// Alias for [`on`](Self::on).
    pub fn add_listener(&self, key: impl Into<EventKey>, listener: Listener) -> &Self {
        self.on(key, listener)
    }

    /// Inserts `listener` in front of `key`'s listeners.
    ///
    /// The most recent prepend fires first.
    pub fn prepend_listener(&self, key: impl Into<EventKey>, listener: Listener) -> &Self {
        self.register(key.into(), listener, Placement::Front, false);
        self
    }

    /// Like [`on`](Self::on), but the listener removes itself after its first call.
    ///
    /// The registry holds an adapter; pass the original `listener` to
    /// [`remove_listener`](Self::remove_listener) or
    /// [`listener_count`](Self::listener_count).
    pub fn once(&self, key: impl Into<EventKey>, listener: Listener) -> &Self {
        self.register(key.into(), listener, Placement::Back, true);
        self
    }

    /// Like [`prepend_listener`](Self::prepend_listener), but fires at most once.
    pub fn prepend_once_listener(&self, key: impl Into<EventKey>, listener: Listener) -> &Self {
        self.register(key.into(), listener, Placement::Front, true);
        self
    }

    fn register(&self, key: EventKey, listener: Listener, placement: Placement, once: bool) {
        let entry = if once {
            once_adapter(listener.clone(), key.clone(), self.downgrade())
        } else {
            listener.clone()
        };

        {
            let mut registry = self.shared.registry.lock();
            match placement {
                Placement::Back => registry.append(key.clone(), entry),
                Placement::Front => registry.prepend(key.clone(), entry),
            }
        }
        tracing::trace!(key = %key, once, "listener registered");

        if self.shared.cfg.emits_meta_events() {
            self.emit(NEW_LISTENER, Args::new().with(key).with(listener));
        }
    }

    // ---- Removal ----

    /// Removes at most one entry of `key` matching `listener`.
    ///
    /// An entry matches if it is `listener` or a once-adapter wrapping it.
    /// Removing an unknown listener is a no-op.
    pub fn remove_listener(&self, key: impl Into<EventKey>, listener: &Listener) -> &Self {
        let key = key.into();
        let removed = self
            .shared
            .registry
            .lock()
            .remove_first(&key, |entry| entry.matches(listener));

        if let Some(entry) = removed {
            self.removed(key, &entry);
        }
        self
    }

    /// Alias for [`remove_listener`](Self::remove_listener).
    pub fn off(&self, key: impl Into<EventKey>, listener: &Listener) -> &Self {
        self.remove_listener(key, listener)
    }

    /// Removes every listener of `key`, or of every key when `key` is `None`.
    ///
    /// Entries are removed one at a time, each raising its own `removeListener`
    /// meta-event. Only entries present when the call started are removed.
    pub fn remove_all_listeners(&self, key: Option<EventKey>) -> &Self {
        match key {
            Some(key) => self.remove_all_for(&key),
            None => {
                let keys = self.shared.registry.lock().keys();
                for key in &keys {
                    self.remove_all_for(key);
                }
            }
        }
        self
    }

    fn remove_all_for(&self, key: &EventKey) {
        let snapshot = self.shared.registry.lock().snapshot(key);
        for entry in &snapshot {
            self.remove_entry(key, entry);
        }
    }

    /// Removes the entry that *is* `entry` (pointer identity, no unwrapping).
    ///
    /// Used by once-adapters to remove themselves and never an entry wrapping them.
    pub(crate) fn remove_entry(&self, key: &EventKey, entry: &Listener) -> bool {
        let removed = self
            .shared
            .registry
            .lock()
            .remove_first(key, |e| e.ptr_eq(entry));

        match removed {
            Some(removed) => {
                self.removed(key.clone(), &removed);
                true
            }
            None => false,
        }
    }

    /// Bookkeeping after an entry left the registry.
    fn removed(&self, key: EventKey, entry: &Listener) {
        tracing::trace!(key = %key, once = entry.is_once(), "listener removed");

        if self.shared.cfg.emits_meta_events() {
            let listener = entry.unwrapped().clone();
            self.emit(REMOVE_LISTENER, Args::new().with(key).with(listener));
        }
    }

    // ---- Dispatch ----

    /// Synchronously calls every listener of `key` with `args`, in order.
    ///
    /// Emitting [`ERROR`](crate::ERROR) first calls the
    /// [`ERROR_MONITOR`](crate::ERROR_MONITOR) listeners.
    ///
    /// Returns `true` if at least one listener was called, regardless of
    /// whether any of them failed.
    pub fn emit(&self, key: impl Into<EventKey>, args: Args) -> bool {
        let key = key.into();
        let snapshot = self.shared.registry.lock().dispatch_snapshot(&key);
        tracing::trace!(key = %key, listeners = snapshot.len(), "emit");

        for (index, listener) in snapshot.iter().enumerate() {
            if let Err(error) = listener.call(&args) {
                self.report(&key, index, error);
            }
        }
        !snapshot.is_empty()
    }

    fn report(&self, key: &EventKey, index: usize, error: ListenerError) {
        if self.shared.observers.is_empty() {
            return;
        }
        let failure = ListenerFailure::new(key.clone(), index, error);
        for observer in &self.shared.observers {
            tracing::trace!(
                observer = observer.name(),
                key = %key,
                index,
                seq = failure.seq,
                "reporting listener failure"
            );
            observer.on_failure(&failure);
        }
    }

    // ---- Introspection ----

    /// Keys with at least one listener, in registration order.
    pub fn event_names(&self) -> Vec<EventKey> {
        self.shared.registry.lock().keys()
    }

    /// Number of entries for `key`; with `listener`, the number matching it.
    ///
    /// Once-adapters match their original listener.
    pub fn listener_count(&self, key: impl Into<EventKey>, listener: Option<&Listener>) -> usize {
        self.shared.registry.lock().count(&key.into(), listener)
    }

    /// Copy of `key`'s listeners. Once-entries appear as their adapters.
    pub fn listeners(&self, key: impl Into<EventKey>) -> Vec<Listener> {
        self.shared.registry.lock().snapshot(&key.into())
    }

    /// Copy of `key`'s listeners; identical to [`listeners`](Self::listeners).
    pub fn raw_listeners(&self, key: impl Into<EventKey>) -> Vec<Listener> {
        self.listeners(key)
    }

    /// Always `None`: the number of listeners per key is unbounded.
    #[inline]
    pub fn get_max_listeners(&self) -> Option<usize> {
        None
    }

    /// No-op, kept for compatibility.
    #[inline]
    pub fn set_max_listeners(&self, _n: usize) -> &Self {
        self
    }

    /// Returns `true` when no key has listeners.
    pub fn is_empty(&self) -> bool {
        self.shared.registry.lock().is_empty()
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("cfg", &self.shared.cfg)
            .field("events", &self.event_names())
            .field("observers", &self.shared.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::args;
    use crate::events::{ERROR, ERROR_MONITOR, Symbol};

    type Log = Arc<Mutex<Vec<String>>>;

    fn log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    /// Listener pushing `"<name>:<first i32 arg>"` (or just `name`) into `log`.
    fn recorder(log: &Log, name: &'static str) -> Listener {
        let log = log.clone();
        Listener::new(move |args| {
            let entry = match args.get::<i32>(0) {
                Some(v) => format!("{name}:{v}"),
                None => name.to_string(),
            };
            log.lock().push(entry);
        })
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().clone()
    }

    fn quiet() -> Emitter {
        Emitter::with_config(EmitterConfig {
            emit_emitter_events: false,
            ..EmitterConfig::default()
        })
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<ListenerFailure>>);

    impl Observe for Collect {
        fn on_failure(&self, failure: &ListenerFailure) {
            self.0.lock().push(failure.clone());
        }
    }

    #[test]
    fn test_concrete_scenario() {
        let log = log();
        let emitter = Emitter::new();
        let f = recorder(&log, "f");
        let g = recorder(&log, "g");

        emitter.on("x", f.clone()).on("x", g);
        assert!(emitter.emit("x", args![1i32]));
        assert_eq!(entries(&log), ["f:1", "g:1"]);
        assert_eq!(emitter.listener_count("x", None), 2);

        emitter.remove_listener("x", &f);
        assert_eq!(emitter.listener_count("x", None), 1);

        emitter.remove_all_listeners(None);
        assert!(emitter.event_names().is_empty());
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_registration_order() {
        let log = log();
        let emitter = Emitter::new();
        for name in ["a", "b", "c", "d"] {
            emitter.add_listener("x", recorder(&log, name));
        }
        emitter.emit("x", args![]);
        assert_eq!(entries(&log), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_prepend_order() {
        let log = log();
        let emitter = Emitter::new();
        emitter
            .on("x", recorder(&log, "a"))
            .prepend_listener("x", recorder(&log, "b"))
            .prepend_listener("x", recorder(&log, "c"))
            .on("x", recorder(&log, "d"));

        emitter.emit("x", args![]);
        assert_eq!(entries(&log), ["c", "b", "a", "d"]);
    }

    #[test]
    fn test_duplicates_are_independent() {
        let log = log();
        let emitter = Emitter::new();
        let f = recorder(&log, "f");
        emitter.on("x", f.clone()).on("x", f.clone());

        emitter.emit("x", args![1i32]);
        assert_eq!(entries(&log), ["f:1", "f:1"]);
        assert_eq!(emitter.listener_count("x", Some(&f)), 2);

        emitter.off("x", &f);
        assert_eq!(emitter.listener_count("x", Some(&f)), 1);
        emitter.off("x", &f);
        assert_eq!(emitter.listener_count("x", None), 0);
        assert!(!emitter.emit("x", args![]));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let emitter = Emitter::new();
        let f = Listener::new(|_| {});
        let g = Listener::new(|_| {});
        emitter.on("x", f);
        emitter.remove_listener("x", &g).remove_listener("y", &g);
        assert_eq!(emitter.listener_count("x", None), 1);
        assert_eq!(emitter.event_names(), vec![EventKey::from("x")]);
    }

    #[test]
    fn test_once_fires_once() {
        let log = log();
        let emitter = Emitter::new();
        let f = recorder(&log, "f");
        emitter.on("x", recorder(&log, "g")).once("x", f.clone());
        assert_eq!(emitter.listener_count("x", None), 2);

        assert!(emitter.emit("x", args![1i32]));
        assert!(emitter.emit("x", args![2i32]));
        assert!(emitter.emit("x", args![3i32]));

        assert_eq!(entries(&log), ["g:1", "f:1", "g:2", "g:3"]);
        assert_eq!(emitter.listener_count("x", None), 1);
        assert!(emitter.listeners("x").iter().all(|l| !l.matches(&f)));
    }

    #[test]
    fn test_prepend_once_fires_first_then_never() {
        let log = log();
        let emitter = Emitter::new();
        emitter
            .on("x", recorder(&log, "a"))
            .prepend_once_listener("x", recorder(&log, "b"));

        emitter.emit("x", args![1i32]);
        emitter.emit("x", args![2i32]);
        assert_eq!(entries(&log), ["b:1", "a:1", "a:2"]);
    }

    #[test]
    fn test_once_last_listener_drops_key() {
        let emitter = Emitter::new();
        emitter.once("x", Listener::new(|_| {}));
        assert!(emitter.emit("x", args![]));
        assert!(emitter.event_names().is_empty());
        assert!(!emitter.emit("x", args![]));
    }

    #[test]
    fn test_once_removed_by_original() {
        let log = log();
        let emitter = Emitter::new();
        let f = recorder(&log, "f");
        emitter.once("x", f.clone());

        assert_eq!(emitter.listener_count("x", Some(&f)), 1);
        emitter.off("x", &f);
        assert_eq!(emitter.listener_count("x", None), 0);
        assert!(!emitter.emit("x", args![]));
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_once_fires_once_even_when_failing() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let emitter = Emitter::new();
        emitter.once(
            "x",
            Listener::new(move |_| {
                h.fetch_add(1, Ordering::SeqCst);
                panic!("first and last");
            }),
        );

        assert!(emitter.emit("x", args![]));
        assert!(!emitter.emit("x", args![]));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_once_wrapping_an_adapter_leaves_no_entry() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let emitter = Emitter::new();
        emitter.once(
            "x",
            Listener::new(move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let inner = emitter.listeners("x").remove(0);
        emitter.prepend_once_listener("x", inner);
        assert_eq!(emitter.listener_count("x", None), 2);

        assert!(emitter.emit("x", args![]));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.listener_count("x", None), 0);
        assert!(!emitter.emit("x", args![]));
        assert!(!emitter.emit("x", args![]));
        assert!(emitter.event_names().is_empty());
    }

    #[test]
    fn test_remove_entry_ignores_wrappers() {
        let emitter = quiet();
        let f = Listener::new(|_| {});
        emitter.once("x", f.clone());

        assert!(!emitter.remove_entry(&EventKey::from("x"), &f));
        assert_eq!(emitter.listener_count("x", None), 1);

        let adapter = emitter.listeners("x").remove(0);
        assert!(emitter.remove_entry(&EventKey::from("x"), &adapter));
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_observer_name_defaults_to_type_name() {
        let collect = Collect::default();
        assert!(collect.name().ends_with("Collect"));
    }

    #[test]
    fn test_once_reentrant_emit_fires_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let emitter = Emitter::new();
        let h = hits.clone();
        let inner = emitter.clone();
        emitter.once(
            "x",
            Listener::new(move |_| {
                h.fetch_add(1, Ordering::SeqCst);
                inner.emit("x", args![]);
            }),
        );

        emitter.emit("x", args![]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.listener_count("x", None), 0);
    }

    #[test]
    fn test_listeners_expose_adapters() {
        let log = log();
        let emitter = Emitter::new();
        let f = recorder(&log, "f");
        let g = recorder(&log, "g");
        emitter.on("x", g.clone()).once("x", f.clone());

        let listeners = emitter.listeners("x");
        let raw = emitter.raw_listeners("x");
        assert_eq!(listeners.len(), 2);
        assert!(listeners[0].ptr_eq(&g));
        assert!(listeners[1].is_once());
        assert!(!listeners[1].ptr_eq(&f));
        assert!(listeners[1].unwrapped().ptr_eq(&f));
        assert!(raw[1].ptr_eq(&listeners[1]));

        // the adapter is callable and still removes itself
        listeners[1].call(&args![5i32]).unwrap();
        assert_eq!(entries(&log), ["f:5"]);
        assert_eq!(emitter.listener_count("x", None), 1);
    }

    #[test]
    fn test_listeners_is_a_copy() {
        let emitter = Emitter::new();
        emitter.on("x", Listener::new(|_| {}));
        let copy = emitter.listeners("x");
        emitter.on("x", Listener::new(|_| {}));
        assert_eq!(copy.len(), 1);
        assert!(emitter.listeners("missing").is_empty());
    }

    #[test]
    fn test_snapshot_keeps_removed_listener_this_round() {
        let log = log();
        let emitter = Emitter::new();
        let victim = recorder(&log, "victim");

        let em = emitter.clone();
        let v = victim.clone();
        let l = log.clone();
        emitter.on(
            "x",
            Listener::new(move |_| {
                l.lock().push("remover".into());
                em.remove_listener("x", &v);
            }),
        );
        emitter.on("x", victim);

        emitter.emit("x", args![]);
        assert_eq!(entries(&log), ["remover", "victim"]);

        emitter.emit("x", args![]);
        assert_eq!(entries(&log), ["remover", "victim", "remover"]);
    }

    #[test]
    fn test_snapshot_defers_added_listener() {
        let log = log();
        let emitter = Emitter::new();
        let late = recorder(&log, "late");

        let em = emitter.clone();
        let l = log.clone();
        emitter.once(
            "x",
            Listener::new(move |_| {
                l.lock().push("adder".into());
                em.on("x", late.clone());
            }),
        );

        emitter.emit("x", args![]);
        assert_eq!(entries(&log), ["adder"]);

        emitter.emit("x", args![]);
        assert_eq!(entries(&log), ["adder", "late"]);
    }

    #[test]
    fn test_remove_all_during_emit_keeps_snapshot() {
        let log = log();
        let emitter = Emitter::new();
        let em = emitter.clone();
        emitter.on(
            "x",
            Listener::new(move |_| {
                em.remove_all_listeners(None);
            }),
        );
        emitter.on("x", recorder(&log, "b"));

        assert!(emitter.emit("x", args![]));
        assert_eq!(entries(&log), ["b"]);
        assert!(!emitter.emit("x", args![]));
    }

    #[test]
    fn test_fault_isolation() {
        let log = log();
        let emitter = Emitter::new();
        emitter
            .on("x", Listener::new(|_| panic!("a exploded")))
            .on("x", Listener::fallible(|_| Err::<(), _>("b refused")))
            .on("x", recorder(&log, "c"));

        assert!(emitter.emit("x", args![7i32]));
        assert_eq!(entries(&log), ["c:7"]);
    }

    #[test]
    fn test_emit_returns_true_when_all_fail() {
        let emitter = Emitter::new();
        emitter
            .on("x", Listener::new(|_| panic!("one")))
            .on("x", Listener::new(|_| panic!("two")));
        assert!(emitter.emit("x", args![]));
    }

    #[test]
    fn test_emit_unregistered_returns_false() {
        let emitter = Emitter::new();
        assert!(!emitter.emit("unregistered-key", args![]));
        assert!(emitter.event_names().is_empty());
    }

    #[test]
    fn test_error_monitor_fan_out() {
        let log = log();
        let emitter = Emitter::new();
        emitter
            .on(ERROR, recorder(&log, "handler"))
            .on(ERROR_MONITOR, recorder(&log, "monitor"));

        assert!(emitter.emit(ERROR, args![42i32]));
        assert_eq!(entries(&log), ["monitor:42", "handler:42"]);

        emitter.emit("other", args![1i32]);
        emitter.emit("errorMonitor", args![1i32]);
        assert_eq!(entries(&log), ["monitor:42", "handler:42"]);

        // monitors are not consumed by firing
        emitter.emit("error", args![43i32]);
        assert_eq!(
            entries(&log),
            ["monitor:42", "handler:42", "monitor:43", "handler:43"]
        );
        assert_eq!(emitter.listener_count(ERROR, None), 1);
        assert_eq!(emitter.listener_count(ERROR_MONITOR, None), 1);
    }

    #[test]
    fn test_error_with_only_monitor() {
        let log = log();
        let emitter = Emitter::new();
        emitter.on(ERROR_MONITOR, recorder(&log, "monitor"));
        assert!(emitter.emit(ERROR, args![1i32]));
        assert_eq!(entries(&log), ["monitor:1"]);
    }

    #[test]
    fn test_symbol_keys() {
        let log = log();
        let emitter = Emitter::new();
        let a = Symbol::new("ready");
        let b = Symbol::new("ready");
        emitter.on(a, recorder(&log, "a"));

        assert!(!emitter.emit(b, args![]));
        assert!(!emitter.emit("ready", args![]));
        assert!(emitter.emit(a, args![]));
        assert_eq!(entries(&log), ["a"]);
    }

    #[test]
    fn test_event_names_order() {
        let emitter = quiet();
        let f = Listener::new(|_| {});
        emitter
            .on("b", f.clone())
            .on("a", f.clone())
            .on(ERROR_MONITOR, f.clone())
            .on("b", f.clone());
        assert_eq!(
            emitter.event_names(),
            vec![EventKey::from("b"), EventKey::from("a"), ERROR_MONITOR]
        );
    }

    #[test]
    fn test_new_listener_meta_event() {
        let seen: Arc<Mutex<Vec<(EventKey, Listener)>>> = Arc::new(Mutex::new(Vec::new()));
        let emitter = Emitter::new();
        let s = seen.clone();
        let meta = Listener::new(move |args| {
            let key = args.get::<EventKey>(0).cloned().unwrap();
            let listener = args.get::<Listener>(1).cloned().unwrap();
            s.lock().push((key, listener));
        });
        emitter.on(NEW_LISTENER, meta.clone());

        let f = Listener::new(|_| {});
        emitter.on("x", f.clone()).once("y", f.clone());

        let seen = seen.lock();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0, NEW_LISTENER);
        assert!(seen[0].1.ptr_eq(&meta));
        assert_eq!(seen[1].0, EventKey::from("x"));
        assert!(seen[1].1.ptr_eq(&f));
        // once-registrations report the caller's listener, not the adapter
        assert_eq!(seen[2].0, EventKey::from("y"));
        assert!(seen[2].1.ptr_eq(&f));
    }

    #[test]
    fn test_remove_listener_meta_event() {
        let seen: Arc<Mutex<Vec<(EventKey, Listener)>>> = Arc::new(Mutex::new(Vec::new()));
        let emitter = Emitter::new();
        let s = seen.clone();
        emitter.on(
            REMOVE_LISTENER,
            Listener::new(move |args| {
                let key = args.get::<EventKey>(0).cloned().unwrap();
                let listener = args.get::<Listener>(1).cloned().unwrap();
                s.lock().push((key, listener));
            }),
        );

        let f = Listener::new(|_| {});
        let g = Listener::new(|_| {});
        emitter.on("x", f.clone()).once("y", g.clone());

        emitter.off("x", &g);
        assert!(seen.lock().is_empty());

        emitter.off("x", &f);
        emitter.emit("y", args![]);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, EventKey::from("x"));
        assert!(seen[0].1.ptr_eq(&f));
        assert_eq!(seen[1].0, EventKey::from("y"));
        assert!(seen[1].1.ptr_eq(&g));
    }

    #[test]
    fn test_meta_events_disabled() {
        let hits = Arc::new(AtomicUsize::new(0));
        let emitter = quiet();
        for key in [NEW_LISTENER, REMOVE_LISTENER] {
            let h = hits.clone();
            emitter.on(
                key,
                Listener::new(move |_| {
                    h.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }
        let f = Listener::new(|_| {});
        emitter.on("x", f.clone()).once("x", f.clone());
        emitter.off("x", &f).off("x", &f);
        emitter.remove_all_listeners(None);

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(!emitter.config().emits_meta_events());
    }

    #[test]
    fn test_failing_meta_handler_is_swallowed() {
        let emitter = Emitter::new();
        emitter.on(NEW_LISTENER, Listener::new(|_| panic!("meta handler")));
        emitter.on("x", Listener::new(|_| {}));
        assert_eq!(emitter.listener_count("x", None), 1);
    }

    #[test]
    fn test_remove_all_for_key_emits_per_entry() {
        let removed = Arc::new(AtomicUsize::new(0));
        let emitter = Emitter::new();
        let r = removed.clone();
        emitter.on(
            REMOVE_LISTENER,
            Listener::new(move |_| {
                r.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let f = Listener::new(|_| {});
        emitter
            .on("x", f.clone())
            .on("x", f.clone())
            .once("x", f.clone())
            .on("y", f.clone());

        emitter.remove_all_listeners(Some("x".into()));
        assert_eq!(removed.load(Ordering::SeqCst), 3);
        assert_eq!(emitter.listener_count("x", None), 0);
        assert_eq!(emitter.listener_count("y", None), 1);

        emitter.remove_all_listeners(Some("missing".into()));
        assert_eq!(removed.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_remove_all_without_key() {
        let emitter = Emitter::new();
        let f = Listener::new(|_| {});
        emitter
            .on("x", f.clone())
            .on("x", f.clone())
            .on(ERROR_MONITOR, f.clone())
            .once("y", f.clone());

        emitter.remove_all_listeners(None);
        assert!(emitter.event_names().is_empty());
        assert_eq!(emitter.listener_count("x", None), 0);
        assert!(emitter.listeners("x").is_empty());
    }

    #[test]
    fn test_max_listeners_stubs() {
        let emitter = quiet();
        assert_eq!(emitter.get_max_listeners(), None);
        emitter.set_max_listeners(1);
        assert_eq!(emitter.get_max_listeners(), None);

        let f = Listener::new(|_| {});
        for _ in 0..10_000 {
            emitter.on("x", f.clone());
        }
        assert_eq!(emitter.listener_count("x", None), 10_000);
    }

    #[test]
    fn test_capture_rejections_is_inert() {
        let emitter = Emitter::with_config(EmitterConfig {
            capture_rejections: true,
            ..EmitterConfig::default()
        });
        emitter.on("x", Listener::new(|_| panic!("still swallowed")));
        assert!(emitter.emit("x", args![]));
        assert!(emitter.config().capture_rejections);
    }

    #[test]
    fn test_observers_receive_failures() {
        let collect = Arc::new(Collect::default());
        let emitter = Emitter::builder(EmitterConfig::default())
            .with_observers(vec![collect.clone() as Arc<dyn Observe>])
            .build();
        emitter
            .on("x", Listener::new(|_| {}))
            .on("x", Listener::fallible(|_| Err::<(), _>("nope")))
            .on("x", Listener::new(|_| panic!("kaboom")));

        emitter.emit("x", args![]);

        let failures = collect.0.lock();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].key, EventKey::from("x"));
        assert_eq!(failures[0].index, 1);
        assert_eq!(
            failures[0].error,
            ListenerError::Failed {
                error: "nope".into()
            }
        );
        assert_eq!(failures[1].index, 2);
        assert!(failures[1].is_panic());
        assert!(failures[1].seq > failures[0].seq);
    }

    #[test]
    fn test_adapter_outlives_emitter() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let emitter = Emitter::new();
        emitter.once(
            "x",
            Listener::new(move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let adapter = emitter.listeners("x").remove(0);
        drop(emitter);

        assert!(adapter.call(&args![]).is_ok());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let hits = Arc::new(AtomicUsize::new(0));
        let emitter = Emitter::new();
        let h = hits.clone();
        emitter.on(
            "tick",
            Listener::new(move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            }),
        );

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let em = emitter.clone();
                scope.spawn(move || {
                    for _ in 0..100 {
                        em.emit("tick", args![]);
                        em.on("other", Listener::new(|_| {}));
                    }
                });
            }
        });

        assert_eq!(hits.load(Ordering::SeqCst), 400);
        assert_eq!(emitter.listener_count("other", None), 400);
    }
}
