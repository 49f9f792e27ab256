//! Ingest command: Fold raw discovery batches into a CI graph and report it
//!
//! Input files are read and parsed concurrently, but batches are applied to
//! the run one at a time, in the order the files were given.

use std::path::Path;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use topograph_core::{
    BuildOptions, CiSink, DiscoveryRun, JsonLinesSink, MemorySink, Neo4jClient, RawBatch,
    ReporterConfig, RunSummary,
};
use tracing::{debug, info};

use crate::cli::IngestArgs;
use crate::types::SinkKind;

/// One input document: a single batch or an array of them
#[derive(Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Many(Vec<RawBatch>),
    One(RawBatch),
}

/// Read and parse one input file
///
/// # Errors
/// Returns an error if the file cannot be read or is not a batch document.
pub async fn load_batches(path: impl AsRef<Path>) -> Result<Vec<RawBatch>> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let batches = match serde_json::from_str(&content)
        .with_context(|| format!("{} is not a discovery batch document", path.display()))?
    {
        BatchFile::Many(batches) => batches,
        BatchFile::One(batch) => vec![batch],
    };

    debug!("Loaded {} batches from {}", batches.len(), path.display());
    Ok(batches)
}

/// Topology options selected on the command line
#[must_use]
pub fn build_options(args: &IngestArgs) -> BuildOptions {
    BuildOptions::default()
        .with_physical_ports(!args.no_physical_ports)
        .with_vlans(!args.no_vlans)
        .with_layer2(!args.no_layer2)
}

/// Run the ingest command
///
/// # Errors
/// Returns an error if an input cannot be loaded or the sink fails.
pub async fn run(args: &IngestArgs) -> Result<RunSummary> {
    let config = ReporterConfig::new().with_max_batch_objects(args.batch_size);

    let summary = match args.sink {
        SinkKind::Memory => {
            let (summary, sink) = drive(MemorySink::new(), config, args).await?;
            info!(
                "Held {} CI objects in {} batches",
                sink.object_count(),
                sink.batches().len()
            );
            summary
        }
        SinkKind::Jsonl => match &args.output {
            Some(path) => {
                let sink = JsonLinesSink::create(path).await?;
                let (summary, sink) = drive(sink, config, args).await?;
                info!("Wrote {} lines to {}", sink.lines(), path.display());
                summary
            }
            None => {
                let sink = JsonLinesSink::new(tokio::io::stdout());
                drive(sink, config, args).await?.0
            }
        },
        SinkKind::Neo4j => {
            let client = Neo4jClient::connect(&args.neo4j.config()?).await?;
            drive(client, config, args).await?.0
        }
    };

    let report = render_summary(&summary);
    if args.sink == SinkKind::Jsonl && args.output.is_none() {
        eprint!("{report}");
    } else {
        print!("{report}");
    }

    Ok(summary)
}

async fn drive<S: CiSink>(
    sink: S,
    config: ReporterConfig,
    args: &IngestArgs,
) -> Result<(RunSummary, S)> {
    let mut run = DiscoveryRun::new(sink, config).with_options(build_options(args));

    let mut loads = stream::iter(&args.inputs)
        .map(load_batches)
        .buffered(args.concurrency.max(1));

    while let Some(batches) = loads.next().await {
        for batch in batches? {
            run.process_batch(batch).await?;
        }
    }

    Ok(run.finish().await?)
}

/// Human readable run report
#[must_use]
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = format!("\nDiscovery run {}\n", summary.id);
    out.push_str(&format!("{}\n", "-".repeat(40)));

    let rows = [
        ("Input batches", summary.batches.to_string()),
        ("Devices", summary.devices.to_string()),
        ("Ports", summary.ports.to_string()),
        ("Links", summary.links.to_string()),
        ("CI objects sent", summary.objects_sent.to_string()),
        ("Sink batches", summary.sink_batches.to_string()),
        ("Refined after send", summary.refined_after_send.to_string()),
        ("Skipped records", summary.skipped_records.to_string()),
        ("Issues", summary.issues.len().to_string()),
    ];
    for (label, value) in rows {
        out.push_str(&format!("{label:<24} {value}\n"));
    }

    let elapsed = summary.finished_at - summary.started_at;
    out.push_str(&format!(
        "{:<24} {}ms\n",
        "Elapsed",
        elapsed.num_milliseconds()
    ));
    out
}

#[cfg(test)]
mod tests;
