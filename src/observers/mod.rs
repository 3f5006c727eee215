//! # Failure observers.
//!
//! - [`Observe`] trait for hooking into swallowed listener failures
//! - [`ListenerFailure`] failure record (key, error, `seq`, `at`)
//! - [`LogWriter`] built-in `tracing` observer (feature `logging`)

mod failure;
mod observe;

#[cfg(feature = "logging")]
mod log;

pub use failure::ListenerFailure;
pub use observe::Observe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
