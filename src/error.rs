//! Error types produced while dispatching events.
//!
//! This module defines [`ListenerError`], the failure of a single listener
//! invocation. Dispatch never propagates it to the caller of
//! [`Emitter::emit`](crate::Emitter::emit); it is only handed to attached
//! [`Observe`](crate::Observe) implementations.
//!
//! Like the rest of the crate it provides helper methods (`as_label`,
//! `as_message`) for logging.

use std::any::Any;

use thiserror::Error;

/// # Errors produced by a listener invocation.
///
/// A listener "throws" either by returning `Err` (see [`Listener::fallible`](crate::Listener::fallible))
/// or by panicking. Both are caught by the emitter and the dispatch continues
/// with the next listener.
///
/// Neither is logged by the emitter. A panic still passes through the process
/// panic hook before it is caught, and the default hook prints it to stderr;
/// returning `Err` is the silent way to fail.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// Listener returned an error.
    #[error("listener failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// Listener panicked; the panic was caught.
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl ListenerError {
    /// Builds a [`ListenerError::Panicked`] from a payload caught by `catch_unwind`.
    ///
    /// `&'static str` and `String` payloads are kept verbatim, anything else
    /// becomes `"unknown panic"`.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let any = &*payload;
        let info = if let Some(msg) = any.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = any.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        ListenerError::Panicked { info }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use tinyemit::ListenerError;
    ///
    /// let err = ListenerError::Failed { error: "boom".into() };
    /// assert_eq!(err.as_label(), "listener_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { error } => format!("error: {error}"),
            ListenerError::Panicked { info } => format!("panic: {info}"),
        }
    }

    /// Indicates whether the failure was a caught panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, ListenerError::Panicked { .. })
    }
}
