//! topograph: CLI for CMDB discovery topology building

use clap::Parser;
use topograph_cli::{commands, setup_logging, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Ingest(args) => {
            commands::ingest::run(&args).await?;
        }
        Commands::Stats(args) => {
            commands::stats::run(&args).await?;
        }
    }

    Ok(())
}
