//! Craftplan CLI - console-driven DIY project tracker

use clap::Parser;
use craftplan_core::config::Config;
use craftplan_core::domain::projects::ProjectService;
use craftplan_core::storage::{Database, DatabaseConfig};
use std::path::PathBuf;

mod menu;

#[derive(Parser)]
#[command(name = "craftplan")]
#[command(author, version, about = "Console-driven DIY project tracker", long_about = None)]
struct Cli {
    /// Path to the SQLite database (overrides config and CRAFTPLAN_DB)
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("craftplan_core=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let database_path = cli.database.unwrap_or_else(|| config.database_path());
    let database = Database::new(
        DatabaseConfig::with_path(database_path).max_connections(config.database.max_connections),
    )
    .await?;

    let service = ProjectService::new(database.clone());
    let result = menu::Menu::new(service)?.run().await;

    database.close().await;
    result?;
    Ok(())
}
