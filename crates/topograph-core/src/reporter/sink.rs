//! Sink abstraction and the in-memory sink

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::SinkError;
use crate::topology::CiObject;

/// One delivery to a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiBatch {
    /// Position of the batch within the run, starting at 0
    pub sequence: u64,
    pub objects: Vec<CiObject>,
}

impl CiBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Destination of reported CI objects
///
/// A failed `send` is fatal for the run: the reporter stops and surfaces the
/// error, leaving the batch's objects unsent.
pub trait CiSink: Send {
    /// Deliver one batch
    ///
    /// # Errors
    /// Returns a [`SinkError`] if the batch could not be delivered.
    fn send(&mut self, batch: &CiBatch) -> impl Future<Output = Result<(), SinkError>> + Send;

    /// Make everything delivered so far durable
    ///
    /// # Errors
    /// Returns a [`SinkError`] if buffered output could not be written.
    fn flush(&mut self) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Sink that keeps every batch in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Vec<CiBatch>,
    flushes: usize,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn batches(&self) -> &[CiBatch] {
        &self.batches
    }

    /// Every delivered object, in delivery order
    pub fn objects(&self) -> impl Iterator<Item = &CiObject> {
        self.batches.iter().flat_map(|b| b.objects.iter())
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.batches.iter().map(CiBatch::len).sum()
    }

    #[must_use]
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl CiSink for MemorySink {
    async fn send(&mut self, batch: &CiBatch) -> Result<(), SinkError> {
        if !batch.is_empty() {
            self.batches.push(batch.clone());
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes += 1;
        Ok(())
    }
}
