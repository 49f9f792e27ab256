//! Tests for the ingest command

#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Cli, Commands, IngestArgs};

mod tests_run;

const TWO_SWITCHES: &str = r#"{
    "devices": [{"id": "sw1", "name": "core-1"}, {"id": "sw2", "name": "core-2"}],
    "ports": [
        {"id": "p1", "deviceId": "sw1", "macAddress": "00:11:22:33:44:55", "physicalLocation": "1/1"},
        {"id": "p2", "deviceId": "sw2", "macAddress": "66:77:88:99:AA:BB", "physicalLocation": "1/2"}
    ],
    "connectivity": [
        {"deviceId": "sw1", "portId": "p1", "remoteDeviceId": "sw2", "remotePortId": "p2"},
        {"deviceId": "sw2", "portId": "p2", "remoteDeviceId": "sw1", "remotePortId": "p1"}
    ]
}"#;

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn ingest_args(args: &[&str]) -> IngestArgs {
    let argv = ["topograph", "ingest"].iter().chain(args).copied();
    match Cli::try_parse_from(argv).unwrap().command {
        Commands::Ingest(args) => args,
        Commands::Stats(_) => unreachable!("parsed an ingest command"),
    }
}
