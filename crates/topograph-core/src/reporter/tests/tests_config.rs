//! Tests for reporter configuration

use crate::reporter::{ReporterConfig, DEFAULT_MAX_BATCH_OBJECTS};

#[test]
fn test_default_batch_size() {
    assert_eq!(
        ReporterConfig::default().max_batch_objects,
        DEFAULT_MAX_BATCH_OBJECTS
    );
    assert_eq!(DEFAULT_MAX_BATCH_OBJECTS, 10_000);
}

#[test]
fn test_zero_batch_size_means_one() {
    let config = ReporterConfig::new().with_max_batch_objects(0);
    assert_eq!(config.max_batch_objects, 1);
}
