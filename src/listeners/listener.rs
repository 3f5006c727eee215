//! # Listener handles.
//!
//! A [`Listener`] is a cheaply clonable handle around a callback. Identity is the
//! identity of the handle's allocation: clones of one `Listener` are the same
//! listener, two `Listener::new` calls with the same closure body are not.
//!
//! ## Once-adapters
//! [`Emitter::once`](crate::Emitter::once) wraps the caller's listener in an
//! adapter that is itself a `Listener`. The adapter exposes the wrapped listener
//! through [`Listener::original`], and every identity-based operation of the
//! emitter treats an adapter as matching its original.
//!
//! ## Failures
//! [`Listener::call`] never unwinds: a panic inside the callback is caught with
//! `catch_unwind` and returned as [`ListenerError::Panicked`]. The panic hook
//! still runs, so the default hook prints the panic to stderr; use
//! [`Listener::fallible`] for failures that must stay silent.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a listener panics while holding a lock on it.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::ListenerError;
use crate::events::Args;

pub(crate) type Callback = dyn Fn(&Args) -> Result<(), ListenerError> + Send + Sync;

pub(crate) struct ListenerInner {
    pub(crate) call: Box<Callback>,
    /// Wrapped listener, set for once-adapters only.
    pub(crate) original: Option<Listener>,
}

/// Callable registered against an event key.
///
/// ## Example
/// ```rust
/// use tinyemit::{args, Listener};
///
/// let l = Listener::new(|args| {
///     assert_eq!(args.get::<u32>(0), Some(&1));
/// });
/// assert!(l.call(&args![1u32]).is_ok());
/// assert!(l.ptr_eq(&l.clone()));
/// ```
#[derive(Clone)]
pub struct Listener {
    inner: Arc<ListenerInner>,
}

impl Listener {
    /// Creates a listener from an infallible callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        Self::from_inner(Arc::new(ListenerInner {
            call: Box::new(move |args| {
                f(args);
                Ok(())
            }),
            original: None,
        }))
    }

    /// Creates a listener whose `Err` return counts as a failed invocation.
    ///
    /// The error is rendered with `Display` into [`ListenerError::Failed`].
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&Args) -> Result<(), E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self::from_inner(Arc::new(ListenerInner {
            call: Box::new(move |args| {
                f(args).map_err(|e| ListenerError::Failed {
                    error: e.to_string(),
                })
            }),
            original: None,
        }))
    }

    #[inline]
    pub(crate) fn from_inner(inner: Arc<ListenerInner>) -> Self {
        Self { inner }
    }

    /// Invokes the callback, converting a panic into [`ListenerError::Panicked`].
    ///
    /// The panic is caught, but the process panic hook still runs first, and the
    /// default hook prints `thread '..' panicked at ..` to stderr. For failures
    /// that should stay silent, return `Err` from a [`Listener::fallible`]
    /// callback instead of panicking.
    ///
    /// ```rust
    /// use tinyemit::{args, Listener, ListenerError};
    ///
    /// let quiet = Listener::fallible(|_| Err::<(), _>("rejected"));
    /// assert_eq!(
    ///     quiet.call(&args![]),
    ///     Err(ListenerError::Failed { error: "rejected".into() })
    /// );
    /// ```
    pub fn call(&self, args: &Args) -> Result<(), ListenerError> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.inner.call)(args))) {
            Ok(outcome) => outcome,
            Err(payload) => Err(ListenerError::from_panic(payload)),
        }
    }

    /// Returns `true` if both handles refer to the same listener.
    #[inline]
    pub fn ptr_eq(&self, other: &Listener) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the wrapped listener if this is a once-adapter.
    #[inline]
    pub fn original(&self) -> Option<&Listener> {
        self.inner.original.as_ref()
    }

    /// Returns the wrapped listener for once-adapters, `self` otherwise.
    #[inline]
    pub fn unwrapped(&self) -> &Listener {
        self.original().unwrap_or(self)
    }

    #[inline]
    pub fn is_once(&self) -> bool {
        self.inner.original.is_some()
    }

    /// Identity rule shared by removal and counting: an entry matches `other`
    /// if it is `other` or wraps `other`.
    #[inline]
    pub(crate) fn matches(&self, other: &Listener) -> bool {
        self.ptr_eq(other) || self.original().is_some_and(|o| o.ptr_eq(other))
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &Arc::as_ptr(&self.inner))
            .field("once", &self.is_once())
            .finish()
    }
}
