//! Console logging setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber. `EGGWATCH_LOG` overrides the default
/// `info` level (e.g. `EGGWATCH_LOG=eggwatch=debug` to see rejections).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("EGGWATCH_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
