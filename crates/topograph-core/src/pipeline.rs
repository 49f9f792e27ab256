//! Discovery run: ingest, build and report, batch after batch

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::{DiscoveryContext, IngestSummary};
use crate::error::{DataQualityIssue, TopologyError};
use crate::model::RawBatch;
use crate::reporter::{CiSink, IncrementalReporter, ReportSummary, ReporterConfig};
use crate::topology::{BuildOptions, TopologyBuilder};

/// What processing one input batch did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub ingest: IngestSummary,
    /// Size of the graph built after the batch
    pub nodes: usize,
    pub edges: usize,
    pub report: ReportSummary,
    /// Data-quality issues found while building
    pub issues: usize,
}

/// Totals for a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Input batches processed
    pub batches: usize,
    pub devices: usize,
    pub ports: usize,
    pub links: usize,
    pub objects_sent: usize,
    pub sink_batches: u64,
    pub refined_after_send: usize,
    /// Records skipped or rejected during ingestion
    pub skipped_records: usize,
    /// Issues found by the last graph build
    pub issues: Vec<DataQualityIssue>,
}

/// One discovery run
///
/// Owns the run's [`DiscoveryContext`] and reporter. Every input batch is
/// ingested into the context, the graph is rebuilt from the whole context,
/// and objects not yet emitted are reported.
pub struct DiscoveryRun<S> {
    id: Uuid,
    started_at: DateTime<Utc>,
    context: DiscoveryContext,
    options: BuildOptions,
    reporter: IncrementalReporter<S>,
    batches: usize,
    objects_sent: usize,
    refined_after_send: usize,
    /// Objects the last report held back
    held: usize,
    last_issues: Vec<DataQualityIssue>,
}

impl<S: CiSink> DiscoveryRun<S> {
    #[must_use]
    pub fn new(sink: S, config: ReporterConfig) -> Self {
        let id = Uuid::new_v4();
        info!("Starting discovery run {}", id);
        Self {
            id,
            started_at: Utc::now(),
            context: DiscoveryContext::new(),
            options: BuildOptions::default(),
            reporter: IncrementalReporter::new(sink, config),
            batches: 0,
            objects_sent: 0,
            refined_after_send: 0,
            held: 0,
            last_issues: Vec::new(),
        }
    }

    /// Set the build options
    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Ingest one batch, rebuild the graph and report what is new
    ///
    /// # Errors
    /// Returns [`TopologyError::Sink`] if the sink fails. Data problems in
    /// the batch are logged and counted, never returned.
    pub async fn process_batch(&mut self, batch: RawBatch) -> Result<BatchOutcome, TopologyError> {
        self.batches += 1;
        let ingest = self.context.ingest(batch);

        let output = TopologyBuilder::new(&self.context)
            .with_options(self.options.clone())
            .build();

        let report = self.reporter.report(&output.graph).await?;
        self.objects_sent += report.sent;
        self.refined_after_send += report.refined_after_send;
        self.held = report.held;

        let outcome = BatchOutcome {
            ingest,
            nodes: output.graph.node_count(),
            edges: output.graph.edge_count(),
            report,
            issues: output.issues.len(),
        };
        self.last_issues = output.issues;

        info!(
            "Batch {}: graph has {} nodes and {} edges, {} objects staged",
            self.batches, outcome.nodes, outcome.edges, outcome.report.staged
        );

        Ok(outcome)
    }

    /// Send what is still staged and close the run
    ///
    /// Devices known only from their ports never got a record of their own;
    /// they are sent now as they are.
    ///
    /// # Errors
    /// Returns [`TopologyError::Sink`] if the final flush fails.
    pub async fn finish(mut self) -> Result<(RunSummary, S), TopologyError> {
        if self.held > 0 {
            info!("Releasing {} objects still waiting for device records", self.held);
            let output = TopologyBuilder::new(&self.context)
                .with_options(self.options.clone())
                .build();
            let released = self.reporter.release(&output.graph).await?;
            self.objects_sent += released.sent;
        }

        let flushed = self.reporter.flush().await?;
        self.objects_sent += flushed.sent;

        for issue in &self.last_issues {
            warn!("Data quality: {}", issue);
        }

        let summary = RunSummary {
            id: self.id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            batches: self.batches,
            devices: self.context.device_count(),
            ports: self.context.port_count(),
            links: self.context.link_count(),
            objects_sent: self.objects_sent,
            sink_batches: self.reporter.batches_sent(),
            refined_after_send: self.refined_after_send,
            skipped_records: self.context.quality().len(),
            issues: self.last_issues,
        };

        info!(
            "Finished discovery run {}: {} devices, {} ports, {} links, {} objects in {} batches",
            summary.id,
            summary.devices,
            summary.ports,
            summary.links,
            summary.objects_sent,
            summary.sink_batches
        );

        Ok((summary, self.reporter.into_sink()))
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn context(&self) -> &DiscoveryContext {
        &self.context
    }

    pub fn reporter(&self) -> &IncrementalReporter<S> {
        &self.reporter
    }
}
