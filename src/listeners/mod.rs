//! Listener handles and the once-adapter.
//!
//! - [`Listener`] callable handle with identity semantics
//! - `once` self-removing wrapper used by `Emitter::once` / `Emitter::prepend_once_listener`

mod listener;
mod once;

pub use listener::Listener;
pub(crate) use once::once_adapter;
