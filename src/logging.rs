//! Logging init: env-filtered subscriber writing to stderr.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr. `RUST_LOG` takes precedence
/// over the built-in filter. Safe to call more than once; only the
/// first call installs a subscriber (relevant for embedding runtimes
/// and for tests).
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fnrelay=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
