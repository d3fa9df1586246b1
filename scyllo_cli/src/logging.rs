//! Logging setup for the command line tool
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging to stderr
///
/// The filter is read from `RUST_LOG`, falling back to `default_filter`, e.g.
/// `RUST_LOG=scyllo_core=debug` shows every emitted constraint.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
