//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Pick the filter directive: a non-empty `RUST_LOG` wins, then `-v`
/// (debug), then the configured level.
pub fn filter_directive(rust_log: Option<&str>, verbose: bool, configured: &str) -> String {
    match rust_log.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ if verbose => "debug".to_string(),
        _ => configured.to_string(),
    }
}

/// Initialize tracing for the process with the given filter directive.
/// Logs go to stderr so command output stays on stdout.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(directive: &str, json: bool) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins_over_verbose() {
        assert_eq!(
            filter_directive(Some("online_wallet=trace"), true, "warn"),
            "online_wallet=trace"
        );
    }

    #[test]
    fn test_verbose_wins_over_configured_level() {
        assert_eq!(filter_directive(None, true, "warn"), "debug");
    }

    #[test]
    fn test_configured_level_is_the_fallback() {
        assert_eq!(filter_directive(None, false, "warn"), "warn");
        assert_eq!(filter_directive(Some("  "), false, "error"), "error");
    }
}
