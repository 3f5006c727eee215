//! # Event keys.
//!
//! An [`EventKey`] names a channel of listeners. It is either a string name or an
//! opaque [`Symbol`]. Keys are only ever compared for equality; they are never
//! parsed or pattern-matched.
//!
//! ## Reserved keys
//! - [`ERROR`] (`"error"`): emitting it also fans out to [`ERROR_MONITOR`] listeners.
//! - [`ERROR_MONITOR`]: reserved symbol for observing `"error"` emissions.
//! - [`NEW_LISTENER`] / [`REMOVE_LISTENER`]: meta-events raised on registry changes.
//!
//! ## Uniqueness
//! Each [`Symbol::new`] call draws a fresh id from a global counter. Id `0` is
//! reserved for [`ERROR_MONITOR`] and never handed out, so no user-allocated
//! symbol and no string can collide with it.
//!
//! ## Example
//! ```rust
//! use tinyemit::{EventKey, Symbol, ERROR_MONITOR};
//!
//! let a = Symbol::new("ready");
//! let b = Symbol::new("ready");
//! assert_ne!(a, b);
//! assert_ne!(EventKey::from(a), ERROR_MONITOR);
//! assert_eq!(EventKey::from("ready"), EventKey::from(String::from("ready")));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Global id counter for symbols. Starts at 1; 0 belongs to the error monitor.
static SYMBOL_SEQ: AtomicU64 = AtomicU64::new(1);

/// Key emitted for errors; also dispatches to [`ERROR_MONITOR`] listeners.
pub const ERROR: EventKey = EventKey::Name(Cow::Borrowed("error"));

/// Meta-event raised after a listener was registered. Args: `[EventKey, Listener]`.
pub const NEW_LISTENER: EventKey = EventKey::Name(Cow::Borrowed("newListener"));

/// Meta-event raised after a listener was removed. Args: `[EventKey, Listener]`.
pub const REMOVE_LISTENER: EventKey = EventKey::Name(Cow::Borrowed("removeListener"));

/// Reserved key observing every [`ERROR`] emission.
pub const ERROR_MONITOR: EventKey = EventKey::Symbol(Symbol::ERROR_MONITOR);

/// Opaque unique token usable as an event key.
///
/// Equality and hashing use the id only; the description is for `Debug` output.
#[derive(Clone, Copy)]
pub struct Symbol {
    id: u64,
    description: &'static str,
}

impl Symbol {
    const ERROR_MONITOR: Symbol = Symbol {
        id: 0,
        description: "errorMonitor",
    };

    /// Allocates a new symbol, distinct from every other symbol in the process.
    pub fn new(description: &'static str) -> Self {
        Self {
            id: SYMBOL_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            description,
        }
    }

    /// Returns the description given at allocation.
    #[inline]
    pub fn description(&self) -> &'static str {
        self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})#{}", self.description, self.id)
    }
}

/// Identifier of an event channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKey {
    /// String name, e.g. `"data"`.
    Name(Cow<'static, str>),
    /// Opaque unique token.
    Symbol(Symbol),
}

impl EventKey {
    /// Returns the name for string keys, `None` for symbols.
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            EventKey::Name(name) => Some(name),
            EventKey::Symbol(_) => None,
        }
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, EventKey::Symbol(_))
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKey::Name(name) => f.write_str(name),
            EventKey::Symbol(sym) => write!(f, "Symbol({})", sym.description),
        }
    }
}

impl From<&'static str> for EventKey {
    fn from(name: &'static str) -> Self {
        EventKey::Name(Cow::Borrowed(name))
    }
}

impl From<String> for EventKey {
    fn from(name: String) -> Self {
        EventKey::Name(Cow::Owned(name))
    }
}

impl From<Symbol> for EventKey {
    fn from(sym: Symbol) -> Self {
        EventKey::Symbol(sym)
    }
}

impl From<&EventKey> for EventKey {
    fn from(key: &EventKey) -> Self {
        key.clone()
    }
}
