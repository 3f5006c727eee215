//! # tinyemit
//!
//! **tinyemit** is a synchronous, in-process event emitter for Rust.
//!
//! Listeners are registered against event keys (string names or unique
//! [`Symbol`]s) and called in a deterministic order whenever the key is emitted.
//! Everything happens on the caller's thread, inside the `emit` call.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   on / prepend_listener / once / prepend_once_listener
//!        │                               │
//!        │                       (once-adapter wraps the listener)
//!        ▼                               ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Emitter (clonable handle)                                        │
//! │  - Registry: key → [Listener, ...] (insertion ordered, no empties)│
//! │  - EmitterConfig (meta-events on/off, reserved flags)             │
//! │  - Observers (optional, see swallowed failures)                   │
//! └──────┬──────────────────────────────┬─────────────────────────────┘
//!        │ registry change              │ emit(key, args)
//!        ▼                              ▼
//!  emit(newListener | removeListener)   snapshot (+ ERROR_MONITOR for "error")
//!   with [key, listener]                       │
//!                                  ┌───────────┼───────────┐
//!                                  ▼           ▼           ▼
//!                              listener1   listener2   listenerN
//!                                  │ panic / Err: caught, handed to observers
//!                                  ▼
//!                           next listener
//! ```
//!
//! ### Dispatch rules
//! ```text
//! emit(key, args)
//!   ├─► snapshot the listeners (copy, under the lock)
//!   ├─► call each one in order with &args (no lock held)
//!   │     └─ failure ─► discarded (or reported to observers), continue
//!   └─► return !snapshot.is_empty()
//!
//! Registrations/removals done by listeners affect the *next* emission only.
//! ```
//!
//! ## Features
//! | Area             | Description                                                   | Key types                              |
//! |------------------|---------------------------------------------------------------|----------------------------------------|
//! | **Emitter**      | Register, remove, introspect and emit.                        | [`Emitter`]                            |
//! | **Keys**         | String names, unique symbols, reserved keys.                  | [`EventKey`], [`Symbol`], [`ERROR_MONITOR`] |
//! | **Listeners**    | Identity-compared callable handles, once-adapters.            | [`Listener`], [`Args`]                 |
//! | **Errors**       | Typed listener failures.                                      | [`ListenerError`]                      |
//! | **Observers**    | Opt-in hook for swallowed failures.                           | [`Observe`], [`ListenerFailure`]       |
//! | **Configuration**| Construction-time flags.                                      | [`EmitterConfig`], [`EmitterBuilder`]  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] observer _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use tinyemit::{args, Emitter, Listener, ERROR, ERROR_MONITOR};
//!
//! let emitter = Emitter::new();
//! let total = Arc::new(AtomicU32::new(0));
//!
//! let t = total.clone();
//! let add = Listener::new(move |args| {
//!     t.fetch_add(*args.get::<u32>(0).unwrap_or(&0), Ordering::SeqCst);
//! });
//!
//! emitter
//!     .on("add", add.clone())
//!     .once("add", add.clone())
//!     .on(ERROR_MONITOR, Listener::new(|_| { /* observe errors */ }));
//!
//! assert!(emitter.emit("add", args![2u32]));    // both entries fire
//! assert!(emitter.emit("add", args![3u32]));    // once-entry is gone
//! assert_eq!(total.load(Ordering::SeqCst), 7);
//!
//! assert!(emitter.emit(ERROR, args!["disk full"])); // monitor only
//! assert!(!emitter.emit("nobody-listens", args![]));
//! ```
mod core;
mod error;
mod events;
mod listeners;
mod observers;

// ---- Public re-exports ----

pub use crate::core::{Emitter, EmitterBuilder, EmitterConfig};
pub use crate::error::ListenerError;
pub use crate::events::{
    Arg, Args, ERROR, ERROR_MONITOR, EventKey, NEW_LISTENER, REMOVE_LISTENER, Symbol,
};
pub use crate::listeners::Listener;
pub use crate::observers::{ListenerFailure, Observe};

// Optional: expose a simple built-in failure logger (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use crate::observers::LogWriter;
