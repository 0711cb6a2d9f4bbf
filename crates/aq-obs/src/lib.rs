//! Logging setup shared by the aq binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when RUST_LOG is unset: info everywhere, debug for aq crates
/// (skipped sites, provider loads, marker passes)
pub const DEFAULT_FILTER: &str = "info,aq=debug";

/// Filter directives from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn filter_directives() -> String {
    match std::env::var("RUST_LOG") {
        Ok(s) if !s.trim().is_empty() => s,
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global subscriber: JSON events, one per line.
pub fn init(service_name: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directives()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(service = %service_name, "Observability initialized");
}
