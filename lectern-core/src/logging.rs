//! Tracing initialization for binaries and test harnesses embedding
//! the pipeline. Library code only emits events; installing a
//! subscriber is the embedder's call.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` when set and defaults to `info`.
/// Calling this twice is harmless; the second install is ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
