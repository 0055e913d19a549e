//! Subscriber setup for binaries. The library only emits events.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`
/// (default `collage=info`). Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("collage=info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
