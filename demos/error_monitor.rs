//! Error monitoring and failure logging.
//!
//! Run with: `cargo run --example error_monitor --features logging`

use std::sync::Arc;

use tinyemit::{
    ERROR, ERROR_MONITOR, Emitter, EmitterConfig, Listener, LogWriter, Observe, args,
};

fn main() {
    // LogWriter writes through `tracing`.
    tracing_subscriber::fmt().with_target(false).init();

    let emitter = Emitter::builder(EmitterConfig::default())
        .with_observers(vec![Arc::new(LogWriter::new()) as Arc<dyn Observe>])
        .build();

    emitter
        .on(
            ERROR_MONITOR,
            Listener::new(|a| println!("[monitor] saw error: {:?}", a.get::<&str>(0))),
        )
        .on(
            ERROR,
            Listener::new(|a| println!("[handler] handling: {:?}", a.get::<&str>(0))),
        )
        .on(ERROR, Listener::new(|_| panic!("handler bug")))
        .on(
            ERROR,
            Listener::fallible(|_| Err::<(), _>("could not page on-call")),
        );

    let delivered = emitter.emit(ERROR, args!["disk full"]);
    println!("[emit] delivered={delivered}");

    // The monitor stays registered and never fires for other keys.
    println!("[emit] other delivered={}", emitter.emit("other", args![]));
}
