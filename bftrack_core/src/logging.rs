//! Logging setup shared by the bftrack binaries.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with a compact format.
///
/// The default level is INFO; `RUST_LOG` overrides it.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}
