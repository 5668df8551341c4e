use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Defaults to `info` for this crate and `warn` for dependencies; override
/// with `RUST_LOG`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rent_scout=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}
