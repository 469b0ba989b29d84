//! Logging setup for binaries. The library itself only emits `tracing` events.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a console subscriber filtered at `level`; `RUST_LOG` wins when
/// set. Calling it again is a no-op.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .ok();
}
