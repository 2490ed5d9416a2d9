use anyhow::Result;
use clap::Parser;
use tracing::info;

use realm_auth::cli::Cli;
use realm_auth::{commands, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::load(cli.config.as_deref())?;

    // Initialize logging
    logging::init_logging(&config.logging);

    info!("Starting realm-auth v{}", env!("CARGO_PKG_VERSION"));

    // Create database pool
    let db = persistence::AuthDatabase::connect(&config.database).await?;

    commands::run(&db, cli.command).await
}
