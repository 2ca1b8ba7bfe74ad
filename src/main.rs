use clap::Parser;
use tracing_subscriber::EnvFilter;
use user_management_api::cli::{self, Cli};
use user_management_api::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, API_TOKEN, etc.
    let _ = dotenvy::dotenv();

    // Configuration is read once here and immutable afterwards
    let config = config::config();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    tracing::info!("Starting User Management API in {:?} mode", config.environment);

    let cli = Cli::parse();
    cli::run(cli, config).await
}
