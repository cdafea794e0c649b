//! Diagnostics for the `kitchen` binary.
//!
//! Recipes, tables and JSON are printed to stdout; everything the crate
//! reports about itself (demotion warnings, seeding, remote calls) is a
//! `tracing` event written to stderr. `kitchen list --format json | jq`
//! therefore keeps working while the service falls back to demo data.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How chatty stderr is, picked with `-q` and `-v` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// `-q`: errors only.
    Quiet,
    /// No flag: seeding notices and fallback warnings.
    #[default]
    Normal,
    /// `-v`: also remote URLs, ids written and favorites loaded.
    Verbose,
    /// `-vv`: also per-page list traffic.
    Trace,
}

impl Verbosity {
    /// The most detailed level shown.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Filter directive used when `RUST_LOG` is unset. Only this crate's events
/// pass; `reqwest` and `rusqlite` internals stay out of the way.
#[must_use]
pub fn default_filter(verbosity: Verbosity) -> String {
    format!("kitchen={}", verbosity.to_level_filter())
}

/// Install the stderr subscriber for the CLI.
///
/// `RUST_LOG` replaces [`default_filter`] outright when set. A second call
/// keeps the first subscriber.
///
/// ```no_run
/// use kitchen::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}

/// Route warnings raised under test through the test harness's capture.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
