//! Stats command: Count CIs stored in Neo4j

use anyhow::Result;
use topograph_core::store::CiStats;
use topograph_core::Neo4jClient;
use tracing::info;

use crate::cli::Neo4jArgs;

/// Run the stats command
///
/// # Errors
/// Returns an error if the connection or query fails.
pub async fn run(args: &Neo4jArgs) -> Result<CiStats> {
    let config = args.config()?;
    let client = Neo4jClient::connect(&config).await?;

    info!("Fetching CI statistics...");
    let stats = client.stats().await?;

    println!("\n{:<24} COUNT", "KIND");
    println!("{}", "-".repeat(32));
    for (kind, count) in &stats.by_kind {
        println!("{:<24} {}", kind, count);
    }
    println!("{}", "-".repeat(32));
    println!("{:<24} {}", "CIs", stats.nodes);

    println!("\n{:<24} COUNT", "RELATIONSHIP");
    println!("{}", "-".repeat(32));
    for (rel, count) in &stats.by_edge_type {
        println!("{:<24} {}", rel, count);
    }
    println!("{}", "-".repeat(32));
    println!("{:<24} {}", "Relationships", stats.edges);

    Ok(stats)
}
