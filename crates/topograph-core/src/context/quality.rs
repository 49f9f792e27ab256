//! Log of skipped and rejected records

use tracing::warn;

use crate::error::{ConfigurationError, DataQualityIssue, RecordError};

/// Data-quality issues and rejected entities recorded during a run
#[derive(Debug, Clone, Default)]
pub struct QualityLog {
    issues: Vec<DataQualityIssue>,
    rejections: Vec<ConfigurationError>,
}

impl QualityLog {
    /// Log and keep a record-level error
    pub fn record(&mut self, err: RecordError) {
        match err {
            RecordError::DataQuality(issue) => self.record_issue(issue),
            RecordError::Configuration(err) => self.record_rejection(err),
        }
    }

    pub fn record_issue(&mut self, issue: DataQualityIssue) {
        warn!("Skipping record: {}", issue);
        self.issues.push(issue);
    }

    pub fn record_rejection(&mut self, err: ConfigurationError) {
        warn!("Rejecting entity: {}", err);
        self.rejections.push(err);
    }

    #[must_use]
    pub fn issues(&self) -> &[DataQualityIssue] {
        &self.issues
    }

    #[must_use]
    pub fn rejections(&self) -> &[ConfigurationError] {
        &self.rejections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len() + self.rejections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
