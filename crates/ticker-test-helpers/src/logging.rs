//! Test-time `tracing` output.

use tracing_subscriber::filter::LevelFilter;

/// Route `tracing` events at `TRACE` and above to the test harness output.
///
/// Safe to call from every test; only the first call in a test binary
/// installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}
