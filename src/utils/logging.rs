//! Diagnostic logging setup.
//!
//! Events go to stderr so they never mix with forwarded child stdout.

use tracing_subscriber::EnvFilter;

/// Filter used with `--debug` when `RUST_LOG` is not set.
pub const DEBUG_FILTER: &str = "cross_run=debug";

/// Filter used otherwise when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "cross_run=warn";

/// Build the event filter. `RUST_LOG` wins over `debug`.
pub fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new(DEBUG_FILTER)
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    })
}

/// Install the global subscriber.
///
/// Calling this twice is harmless; the second subscriber is dropped.
pub fn init_tracing(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(std::io::stderr)
        .with_target(debug)
        .compact()
        .try_init();
}
