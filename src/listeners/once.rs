//! # Self-removing once-adapter.
//!
//! ```text
//! adapter.call(args)
//!     ├─► already fired? ─► return Ok(())   (reentrant emission)
//!     ├─► original.call(args)            (panic/Err captured)
//!     ├─► emitter.remove_entry(key, adapter)   (pointer identity)
//!     └─► return original's outcome
//! ```
//!
//! The adapter removes itself even when the original failed, so it fires at most
//! once. Removal compares against the adapter itself, never against an entry
//! whose original is the adapter (an adapter registered again through `once`). It keeps only a weak handle to the emitter: an adapter never keeps an
//! otherwise dropped emitter alive.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::core::{Emitter, Shared};
use crate::events::EventKey;

use super::listener::{Listener, ListenerInner};

/// Wraps `original` so that it removes itself from `key` after its first call.
pub(crate) fn once_adapter(original: Listener, key: EventKey, emitter: Weak<Shared>) -> Listener {
    let inner = Arc::new_cyclic(|me: &Weak<ListenerInner>| {
        let me = me.clone();
        let target = original.clone();
        let fired = AtomicBool::new(false);

        ListenerInner {
            call: Box::new(move |args| {
                if fired.swap(true, Ordering::AcqRel) {
                    return Ok(());
                }
                let outcome = target.call(args);
                if let (Some(me), Some(shared)) = (me.upgrade(), emitter.upgrade()) {
                    Emitter::from_shared(shared).remove_entry(&key, &Listener::from_inner(me));
                }
                outcome
            }),
            original: Some(original),
        }
    });
    Listener::from_inner(inner)
}
