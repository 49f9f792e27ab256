//! Tests for logging setup
//!
//! The global subscriber can only be installed once per process, so these
//! tests check the filter selection rather than calling `setup_logging`.

#![allow(clippy::unwrap_used)]

use tracing_subscriber::EnvFilter;

use crate::log_directive;

#[test]
fn test_default_level_is_info() {
    assert_eq!(log_directive(false), "info");
}

#[test]
fn test_verbose_level_is_debug() {
    assert_eq!(log_directive(true), "debug");
}

/// The chosen directive must be a filter tracing-subscriber accepts
#[test]
fn test_directives_parse() {
    for verbose in [false, true] {
        let filter = EnvFilter::try_new(log_directive(verbose)).unwrap();
        let debug_str = format!("{filter:?}").to_lowercase();
        assert!(debug_str.contains(log_directive(verbose)));
    }
}
