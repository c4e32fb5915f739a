//! Helpers shared by the integration tests.

use domain_wire::base::Name;

/// Initializes tracing based logging.
///
/// Override the level with the `RUST_LOG` environment variable, e.g.,
/// `RUST_LOG=trace`. Calling this more than once is fine.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}

/// Converts a string into a domain name, panicking if that fails.
pub fn name(s: &str) -> Name {
    s.parse().unwrap()
}
