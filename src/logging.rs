//! Diagnostic logging setup
//!
//! Log lines go to stderr so machine output (JSON, YAML, CSV) on stdout
//! stays clean. `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Level used when the configured one does not parse
pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the effective filter directive
pub fn effective_level(configured: &str, verbose: bool) -> &str {
    if verbose {
        "debug"
    } else if configured.trim().is_empty() {
        DEFAULT_LEVEL
    } else {
        configured
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(configured: &str, verbose: bool) {
    let level = effective_level(configured, verbose);
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(stderr_log.with_filter(build_filter(level)))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_wins() {
        assert_eq!(effective_level("error", true), "debug");
        assert_eq!(effective_level("info", false), "info");
        assert_eq!(effective_level("  ", false), DEFAULT_LEVEL);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("warn", false);
        init("debug", true);
    }
}
