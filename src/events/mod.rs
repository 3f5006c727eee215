//! Event data model: keys and arguments.
//!
//! ## Contents
//! - [`EventKey`], [`Symbol`] channel identifiers and the reserved keys
//!   ([`ERROR`], [`ERROR_MONITOR`], [`NEW_LISTENER`], [`REMOVE_LISTENER`])
//! - [`Args`] type-erased argument list passed to listeners

mod args;
mod key;

pub use args::{Arg, Args};
pub use key::{ERROR, ERROR_MONITOR, EventKey, NEW_LISTENER, REMOVE_LISTENER, Symbol};
