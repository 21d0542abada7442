// Tracing initialization for the CLI. Logs go to stderr so stdout carries
// only the outcome line and the provider response.
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub fn init_tracing(level: Option<&str>) {
    let (filter, rejected) = build_filter(std::env::var("RUST_LOG").ok().as_deref(), level);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();

    for (directives, err) in rejected {
        tracing::warn!("ignoring invalid log filter {directives:?}: {err}");
    }
}

// RUST_LOG wins when set and valid, otherwise the requested level, otherwise
// `info`. Filters that fail to parse are returned with their parse error.
fn build_filter(rust_log: Option<&str>, level: Option<&str>) -> (EnvFilter, Vec<(String, String)>) {
    let mut rejected = Vec::new();
    for directives in [rust_log, level].into_iter().flatten() {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return (filter, rejected),
            Err(e) => rejected.push((directives.to_string(), e.to_string())),
        }
    }
    (EnvFilter::new(DEFAULT_LOG_LEVEL), rejected)
}
