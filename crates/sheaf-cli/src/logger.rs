//! Logging setup for the sheaf CLI.
//!
//! Library crates log through `tracing`; this module installs the
//! subscriber that renders those events on stderr.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheaf_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("generating plan");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "sheaf=debug,sheaf_cli=debug,sheaf_config=debug,sheaf_plan=debug";
const QUIET_FILTER: &str = "sheaf=error,sheaf_cli=error,sheaf_config=error,sheaf_plan=error";
const DEFAULT_FILTER: &str = "sheaf=info,sheaf_cli=info,sheaf_config=info,sheaf_plan=info";

/// Pick the filter directives for the given flags.
///
/// `--verbose` wins over `RUST_LOG`; `--quiet` only shows errors; otherwise
/// `RUST_LOG` is honored and falls back to info for the sheaf crates.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Install the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_filter_directives_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    #[serial]
    fn test_verbose_ignores_rust_log() {
        unsafe {
            std::env::set_var("RUST_LOG", "off");
        }
        let filter = filter_for(true, false);
        assert!(filter.to_string().contains("sheaf_plan=debug"));
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
    }

    #[test]
    #[serial]
    fn test_default_falls_back_to_info() {
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        let filter = filter_for(false, false);
        assert!(filter.to_string().contains("sheaf_plan=info"));
    }

    #[test]
    fn test_double_init_does_not_panic() {
        init_logger(false, true, true);
        init_logger(false, true, true);
    }
}
