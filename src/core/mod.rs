//! Emitter core: registry, dispatch and construction.
//!
//! The public API from this module is [`Emitter`] together with its
//! [`EmitterConfig`] and [`EmitterBuilder`].
//!
//! Internal modules:
//! - [`registry`]: ordered key → listener sequence mapping (plain data);
//! - [`emitter`]: locking, meta-events, snapshot dispatch and failure reporting;
//! - [`builder`]: wires configuration and observers into a new emitter;
//! - [`config`]: construction-time flags.

mod builder;
mod config;
mod emitter;
mod registry;

pub use builder::EmitterBuilder;
pub use config::EmitterConfig;
pub use emitter::Emitter;
pub(crate) use emitter::Shared;
