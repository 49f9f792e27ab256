//! Reporter configuration

/// Batch size used when none is configured
pub const DEFAULT_MAX_BATCH_OBJECTS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Pending objects that trigger a send; never zero
    pub max_batch_objects: usize,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            max_batch_objects: DEFAULT_MAX_BATCH_OBJECTS,
        }
    }
}

impl ReporterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch size; zero is treated as one
    #[must_use]
    pub fn with_max_batch_objects(mut self, max: usize) -> Self {
        self.max_batch_objects = max.max(1);
        self
    }
}
