use anyhow::Context;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: &AppConfig) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    DatabaseManager::ensure_schema(&pool)
        .await
        .context("failed to create users table")?;

    pool.close().await;
    println!("users table is ready");
    Ok(())
}
