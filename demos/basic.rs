//! Basic usage: ordering, once-listeners, meta-events and snapshot dispatch.
//!
//! Run with: `cargo run --example basic`

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tinyemit::{Emitter, EventKey, Listener, NEW_LISTENER, args};

fn main() {
    let emitter = Emitter::new();

    // Print every registration.
    emitter.on(
        NEW_LISTENER,
        Listener::new(|a| {
            if let Some(key) = a.get::<EventKey>(0) {
                println!("[new-listener] key={key}");
            }
        }),
    );

    let greet = Listener::new(|a| {
        println!("[greet] hello, {}", a.get::<&str>(0).unwrap_or(&"stranger"));
    });
    let first = Listener::new(|_| println!("[greet] (prepended, runs first)"));
    let welcome = Listener::new(|_| println!("[greet] (once) welcome aboard"));

    emitter
        .on("greet", greet.clone())
        .prepend_listener("greet", first)
        .once("greet", welcome);

    emitter.emit("greet", args!["alice"]);
    emitter.emit("greet", args!["bob"]);

    // A listener that registers another one mid-emission: the new listener
    // only sees the next emission.
    let late_hits = Arc::new(AtomicUsize::new(0));
    let em = emitter.clone();
    let hits = late_hits.clone();
    emitter.once(
        "tick",
        Listener::new(move |_| {
            let hits = hits.clone();
            em.on(
                "tick",
                Listener::new(move |_| {
                    hits.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }),
    );
    emitter.emit("tick", args![]);
    emitter.emit("tick", args![]);
    println!("[tick] late listener ran {} time(s)", late_hits.load(Ordering::SeqCst));

    emitter.off("greet", &greet);
    println!(
        "[done] greet listeners={} events={:?}",
        emitter.listener_count("greet", None),
        emitter.event_names()
    );
}
