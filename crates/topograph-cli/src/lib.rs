//! topograph-cli library
//!
//! Exposes the CLI definition and commands so they can be tested without
//! spawning the binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod cli;
// Make commands module available for internal tests only
#[doc(hidden)]
pub mod commands;
pub mod types;

pub use cli::{Cli, Commands, IngestArgs, Neo4jArgs};
pub use types::SinkKind;

/// Filter directive for the chosen verbosity
#[must_use]
pub fn log_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so JSON Lines output on stdout stays clean.
pub fn setup_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(log_directive(verbose)))
        .init();
}

#[cfg(test)]
mod tests;
