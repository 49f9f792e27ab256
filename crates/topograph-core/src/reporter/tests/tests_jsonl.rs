//! Tests for the JSON Lines sink

#![allow(clippy::unwrap_used)]

use tempfile::TempDir;

use super::chain;
use crate::reporter::{IncrementalReporter, JsonLinesSink, ReporterConfig};

#[tokio::test]
async fn test_writes_one_line_per_object() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cis.jsonl");

    let sink = JsonLinesSink::create(&path).await.unwrap();
    let mut reporter =
        IncrementalReporter::new(sink, ReporterConfig::new().with_max_batch_objects(2));
    reporter.report(&chain(2)).await.unwrap();
    reporter.flush().await.unwrap();
    assert_eq!(reporter.sink().lines(), 3);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["batch"], 0);
    assert_eq!(lines[0]["object"], "node");
    assert_eq!(lines[0]["id"], "n0");
    assert_eq!(lines[0]["kind"], "interface");
    assert_eq!(lines[2]["batch"], 1);
    assert_eq!(lines[2]["object"], "edge");
    assert_eq!(lines[2]["source_id"], "n0");
}

#[tokio::test]
async fn test_in_memory_writer() {
    let mut reporter = IncrementalReporter::new(
        JsonLinesSink::new(Vec::<u8>::new()),
        ReporterConfig::default(),
    );
    reporter.report(&chain(1)).await.unwrap();
    reporter.flush().await.unwrap();

    let bytes = reporter.into_sink().into_inner();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.ends_with('\n'));
}
