use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tokio::signal;
use tracing::{error, info, warn};

use crate::app::{self, AppState};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, MemoryUserStore, PgUserStore, UserStore};
use crate::middleware::AuthGate;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,
}

pub async fn handle(args: ServeArgs, config: &AppConfig) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    let gate = AuthGate::from_config(&config.security)?;

    let store = open_store(config).await?;
    let app = app::app(AppState::new(store), gate, config);

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("User Management API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Postgres when DATABASE_URL is configured, otherwise the in-memory store.
async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    if config.database.url.is_none() {
        warn!("DATABASE_URL not set; using in-memory store (data is lost on exit)");
        return Ok(Arc::new(MemoryUserStore::new()));
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::ensure_schema(&pool)
        .await
        .context("failed to prepare users table")?;

    Ok(Arc::new(PgUserStore::new(pool)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
