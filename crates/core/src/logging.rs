//! Tracing subscriber setup shared by the binaries and integration tests

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or unparsable
const DEFAULT_DIRECTIVE: &str = "info";

/// Whether this process ended up owning the global subscriber
static SUBSCRIBER_INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install the global fmt subscriber once per process.
///
/// Later calls are no-ops. If another subscriber was installed first it is
/// left in place.
pub fn init_tracing() {
    SUBSCRIBER_INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .is_ok()
    });
}
