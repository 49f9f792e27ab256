//! Incremental emission with a per-object state machine

use std::collections::HashMap;

use tracing::{debug, info};

use super::config::ReporterConfig;
use super::sink::{CiBatch, CiSink};
use crate::error::SinkError;
use crate::topology::{CiGraph, CiObject};

/// Where an object stands in the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitPhase {
    /// Never seen in a built graph
    NotBuilt,
    /// Staged, waiting for a batch to fill
    Built,
    /// Delivered to the sink
    Sent,
}

#[derive(Debug, Clone)]
enum EmitState {
    /// Staged at `slot` in the pending list
    Built { slot: usize, fingerprint: String },
    Sent { fingerprint: String },
}

/// Counters for one `report` or `flush` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Objects newly staged
    pub staged: usize,
    /// Objects delivered to the sink
    pub sent: usize,
    /// Batches delivered to the sink
    pub batches: usize,
    /// Objects skipped because they were already delivered unchanged
    pub already_sent: usize,
    /// Objects whose attributes changed after delivery; not re-sent
    pub refined_after_send: usize,
    /// Provisional objects held back until their record arrives
    pub held: usize,
}

impl ReportSummary {
    fn absorb(&mut self, other: &ReportSummary) {
        self.staged += other.staged;
        self.sent += other.sent;
        self.batches += other.batches;
        self.already_sent += other.already_sent;
        self.refined_after_send += other.refined_after_send;
        self.held += other.held;
    }
}

/// Reports CI graphs to a sink, each object at most once per run
pub struct IncrementalReporter<S> {
    sink: S,
    config: ReporterConfig,
    states: HashMap<String, EmitState>,
    pending: Vec<CiObject>,
    next_sequence: u64,
}

impl<S: CiSink> IncrementalReporter<S> {
    pub fn new(sink: S, config: ReporterConfig) -> Self {
        Self {
            sink,
            config,
            states: HashMap::new(),
            pending: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Stage every object of `graph` not yet emitted, sending full batches
    ///
    /// Objects still staged from an earlier call are replaced by their
    /// current version. Objects already sent are skipped. Provisional nodes
    /// and the edges touching them are held back, so they are sent once,
    /// with their attributes, after their own record arrives.
    ///
    /// # Errors
    /// Returns the sink's error; objects of the failed batch stay unsent.
    pub async fn report(&mut self, graph: &CiGraph) -> Result<ReportSummary, SinkError> {
        self.stage(graph, true).await
    }

    /// Stage every object of `graph` not yet emitted, provisional or not
    ///
    /// Used at the end of a run, when no further record can complete a
    /// held object.
    ///
    /// # Errors
    /// Returns the sink's error.
    pub async fn release(&mut self, graph: &CiGraph) -> Result<ReportSummary, SinkError> {
        self.stage(graph, false).await
    }

    async fn stage(&mut self, graph: &CiGraph, hold: bool) -> Result<ReportSummary, SinkError> {
        let mut summary = ReportSummary::default();

        for object in graph.objects() {
            let id = object.id();
            let fingerprint = object.fingerprint();

            match self.states.get_mut(&id) {
                None if hold && graph.depends_on_provisional(&object) => {
                    summary.held += 1;
                }
                None => {
                    self.states.insert(
                        id,
                        EmitState::Built {
                            slot: self.pending.len(),
                            fingerprint,
                        },
                    );
                    self.pending.push(object);
                    summary.staged += 1;
                }
                Some(EmitState::Built {
                    slot,
                    fingerprint: staged,
                }) => {
                    if *staged != fingerprint {
                        if let Some(entry) = self.pending.get_mut(*slot) {
                            *entry = object;
                        }
                        *staged = fingerprint;
                    }
                }
                Some(EmitState::Sent { fingerprint: sent }) => {
                    if *sent == fingerprint {
                        summary.already_sent += 1;
                    } else {
                        debug!("{} changed after it was sent; not re-sending", id);
                        summary.refined_after_send += 1;
                    }
                }
            }

            if self.pending.len() >= self.config.max_batch_objects {
                summary.absorb(&self.send_pending().await?);
            }
        }

        Ok(summary)
    }

    /// Send whatever is staged
    ///
    /// A no-op when nothing is staged.
    ///
    /// # Errors
    /// Returns the sink's error.
    pub async fn flush(&mut self) -> Result<ReportSummary, SinkError> {
        self.send_pending().await
    }

    async fn send_pending(&mut self) -> Result<ReportSummary, SinkError> {
        if self.pending.is_empty() {
            return Ok(ReportSummary::default());
        }

        let batch = CiBatch {
            sequence: self.next_sequence,
            objects: std::mem::take(&mut self.pending),
        };
        if let Err(err) = self.sink.send(&batch).await {
            self.pending = batch.objects;
            return Err(err);
        }
        self.next_sequence += 1;

        for object in &batch.objects {
            let id = object.id();
            if let Some(state) = self.states.get_mut(&id) {
                if let EmitState::Built { fingerprint, .. } = state {
                    *state = EmitState::Sent {
                        fingerprint: std::mem::take(fingerprint),
                    };
                }
            }
        }

        self.sink.flush().await?;

        info!(
            "Sent batch {} ({} objects)",
            batch.sequence,
            batch.objects.len()
        );

        Ok(ReportSummary {
            sent: batch.objects.len(),
            batches: 1,
            ..ReportSummary::default()
        })
    }

    #[must_use]
    pub fn state_of(&self, id: &str) -> EmitPhase {
        match self.states.get(id) {
            None => EmitPhase::NotBuilt,
            Some(EmitState::Built { .. }) => EmitPhase::Built,
            Some(EmitState::Sent { .. }) => EmitPhase::Sent,
        }
    }

    /// Objects staged but not yet sent
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Batches delivered so far
    #[must_use]
    pub fn batches_sent(&self) -> u64 {
        self.next_sequence
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
