//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`], the construction-time settings of an
//! [`Emitter`](crate::Emitter). The configuration is fixed once the emitter is
//! built; [`Emitter::config`](crate::Emitter::config) only exposes it read-only.
//!
//! ## Reserved flags
//! - `capture_rejections` is accepted for compatibility and has no effect.

/// Construction-time settings of an emitter.
///
/// ## Field semantics
/// - `capture_rejections`: reserved, no behavioral effect (default `false`)
/// - `emit_emitter_events`: raise `newListener` / `removeListener` meta-events
///   on every registry change (default `true`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Reserved. Accepted and stored, never consulted by dispatch.
    pub capture_rejections: bool,

    /// Emit meta-events on registry changes.
    ///
    /// When `true`:
    /// - every registration emits `newListener` with `[key, listener]`
    ///   (the listener as passed by the caller, never the once-adapter);
    /// - every actual removal emits `removeListener` with `[key, listener]`.
    pub emit_emitter_events: bool,
}

impl EmitterConfig {
    /// Returns whether registry changes raise meta-events.
    #[inline]
    pub fn emits_meta_events(&self) -> bool {
        self.emit_emitter_events
    }
}

impl Default for EmitterConfig {
    /// Default configuration:
    ///
    /// - `capture_rejections = false`
    /// - `emit_emitter_events = true`
    fn default() -> Self {
        Self {
            capture_rejections: false,
            emit_emitter_events: true,
        }
    }
}
