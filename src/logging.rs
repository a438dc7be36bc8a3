//! Diagnostic sink initialization
//!
//! The crate itself only emits `tracing` events; the host process decides
//! where they go. This helper installs a formatted stderr subscriber with
//! `RUST_LOG` filtering for hosts that have nothing better wired up.

use tracing_subscriber::EnvFilter;

/// Install the default subscriber. Safe to call more than once; only the
/// first call takes effect.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
