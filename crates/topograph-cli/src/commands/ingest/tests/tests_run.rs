#![allow(clippy::unwrap_used)]

use tempfile::TempDir;

use super::{ingest_args, write_input, TWO_SWITCHES};
use crate::commands::ingest::{build_options, render_summary, run};

#[tokio::test]
async fn test_jsonl_output_file() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "in.json", TWO_SWITCHES);
    let output = temp.path().join("out.jsonl");

    let args = ingest_args(&[
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    let summary = run(&args).await.unwrap();

    assert_eq!(summary.devices, 2);
    assert_eq!(summary.links, 1);

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), summary.objects_sent);
    assert_eq!(
        lines
            .iter()
            .filter(|l| l["kind"] == "layer2_connection")
            .count(),
        1
    );
}

#[tokio::test]
async fn test_memory_sink_over_several_files() {
    let temp = TempDir::new().unwrap();
    let first = write_input(temp.path(), "a.json", TWO_SWITCHES);
    let second = write_input(temp.path(), "b.json", TWO_SWITCHES);

    let args = ingest_args(&[
        first.to_str().unwrap(),
        second.to_str().unwrap(),
        "--sink",
        "memory",
        "--concurrency",
        "2",
    ]);
    let summary = run(&args).await.unwrap();

    assert_eq!(summary.batches, 2);
    assert_eq!(summary.devices, 2);
    assert_eq!(summary.ports, 2);
}

#[tokio::test]
async fn test_layer2_can_be_disabled() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "in.json", TWO_SWITCHES);
    let output = temp.path().join("out.jsonl");

    let args = ingest_args(&[
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--no-layer2",
    ]);
    run(&args).await.unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(!content.contains("layer2_connection"));
}

#[tokio::test]
async fn test_unreadable_input_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.json");

    let args = ingest_args(&[missing.to_str().unwrap(), "--sink", "memory"]);

    assert!(run(&args).await.is_err());
}

#[tokio::test]
async fn test_neo4j_sink_requires_password() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "in.json", TWO_SWITCHES);

    let args = ingest_args(&[input.to_str().unwrap(), "--sink", "neo4j"]);
    let err = run(&args).await.unwrap_err();

    assert!(err.to_string().contains("--neo4j-password"));
}

#[test]
fn test_build_options_from_flags() {
    let options = build_options(&ingest_args(&["in.json", "--no-vlans"]));

    assert!(options.report_physical_ports);
    assert!(!options.report_vlans);
    assert!(options.report_layer2);
}

#[tokio::test]
async fn test_render_summary() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "in.json", TWO_SWITCHES);
    let args = ingest_args(&[input.to_str().unwrap(), "--sink", "memory"]);
    let summary = run(&args).await.unwrap();

    let text = render_summary(&summary);

    assert!(text.contains(&summary.id.to_string()));
    assert!(text.contains(&format!("{:<24} 2", "Devices")));
    assert!(text.contains(&format!("{:<24} 1", "Links")));
}
