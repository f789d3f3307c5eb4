use std::sync::Once;

use tracing::info;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global subscriber. Later calls are no-ops, so every test can
/// call this from its setup.
///
/// `RUST_LOG` wins over `directive` when it is set.
pub fn init(directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(directive))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init()
            .is_ok();
        if installed {
            info!("*****TEST RUN STARTED*****");
        }
    });
}
