//! Logging setup on top of `tracing`.
//!
//! Child process output (packager, webpack) is logged at debug level, so it
//! only shows up with `--verbose` or a matching `RUST_LOG`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "rnws=debug,tower_http=debug";

/// Filter used with `--quiet`.
pub const QUIET_FILTER: &str = "rnws=error";

/// Filter used when neither flag nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "rnws=info";

/// Pick the filter for the given flags.
///
/// Priority: `--verbose`, then `--quiet`, then `RUST_LOG`, then the default.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}
