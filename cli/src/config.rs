use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Overrides the data directory when `--data-dir` is not given.
pub const DATA_DIR_ENV_VAR: &str = "STAFFING_HOME";

/// Used when `RUST_LOG` is unset. Table output owns stdout; logs go to stderr.
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}
