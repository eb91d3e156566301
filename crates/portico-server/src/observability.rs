//! Tracing setup.
//!
//! The subscriber starts at `info` so configuration loading is logged, then
//! [`apply_logging_level`] swaps in the configured `logging.level`.
//! `RUST_LOG` always wins.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

const DEFAULT_LEVEL: &str = "info";

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_tracing() {
    let (filter, handle) = reload::Layer::new(startup_filter());
    if FILTER_HANDLE.set(handle).is_err() {
        return;
    }
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}

/// Replaces the active filter with `level`, unless `RUST_LOG` is set.
pub fn apply_logging_level(level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing::debug!("RUST_LOG is set; ignoring logging.level");
        return;
    }
    let Some(handle) = FILTER_HANDLE.get() else {
        return;
    };
    match handle.reload(level_filter(level)) {
        Ok(()) => tracing::debug!(level, "Logging level applied"),
        Err(e) => tracing::warn!(error = %e, "Failed to apply logging level"),
    }
}

fn startup_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(DEFAULT_LEVEL))
}

// Config validation accepts any case.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level.to_ascii_lowercase())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_level_filter_ignores_case() {
        assert_eq!(level_filter("WARN").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(level_filter("Debug").max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_level_filter_off() {
        assert_eq!(level_filter("off").max_level_hint(), Some(LevelFilter::OFF));
    }
}
