// src/logger.rs
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt};

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

/// Initialize logging once for the whole process. Diagnostics go to
/// stderr; `RUST_LOG` overrides `filter` (e.g. "flockgen=debug").
pub fn init_logging(filter: &str) {
    INIT.get_or_init(|| {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        // Keep the guard alive for the program lifetime
        let _ = GUARD.set(guard);

        let env_filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let subscriber = fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(true)
            .with_writer(non_blocking)
            .finish();

        // Ignore error if someone already set a global subscriber
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
