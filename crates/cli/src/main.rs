use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::Command;
use config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "leadbook")]
#[command(about = "Leads CRM reports over a JSON record snapshot")]
struct Cli {
    /// Snapshot file; overrides `LEADBOOK_SNAPSHOT`.
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadbook_cli=info,leadbook_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = CliConfig::from_env()?;
    if let Some(path) = cli.snapshot {
        config.snapshot_path = path;
    }

    let snapshot = if cli.command.needs_store() {
        commands::load_snapshot(&config.snapshot_path).await?
    } else {
        Default::default()
    };
    let store = Arc::new(leadbook_db::MemoryStore::with_snapshot(snapshot));

    let report = commands::execute(cli.command, store, config.fraction_digits).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
