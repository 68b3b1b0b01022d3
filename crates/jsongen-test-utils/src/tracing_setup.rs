//! Tracing initialisation for tests.
//!
//! [`init_test_tracing`] installs a subscriber at most once per process, so
//! every test may call it.

use tracing_subscriber::EnvFilter;

/// Install a subscriber that writes through the test harness and honours
/// `RUST_LOG` (default `debug` for the jsongen crates).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jsongen_core=debug,jsongen_config=debug")),
        )
        .with_test_writer()
        .try_init();
}
