//! Runs against a real Postgres only when DATABASE_URL is set; otherwise each
//! test returns early.

use anyhow::Result;
use user_management_api::config::DatabaseConfig;
use user_management_api::database::models::NewUser;
use user_management_api::database::{DatabaseManager, PgUserStore, StoreError, UserStore};

async fn store() -> Result<Option<PgUserStore>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres store test");
        return Ok(None);
    };

    let config = DatabaseConfig {
        url: Some(url),
        max_connections: 2,
        connection_timeout: 5,
    };
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::ensure_schema(&pool).await?;
    Ok(Some(PgUserStore::new(pool)))
}

#[tokio::test]
async fn postgres_store_crud_round_trip() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };

    let new_user = NewUser::new(
        "Pg".to_string(),
        "Roundtrip".to_string(),
        "pg.roundtrip@example.com".to_string(),
        "Storage".to_string(),
    );
    let id = store.insert(new_user.clone()).await?;

    let fetched = store.get(id).await?.expect("inserted row");
    assert_eq!(fetched, new_user.clone().into_user(id));

    let mut changed = fetched.clone();
    changed.department = "Archive".to_string();
    assert!(store.update(&changed).await?);
    assert_eq!(store.get(id).await?.expect("row").department, "Archive");

    let page = store.list(0, i64::from(i32::MAX)).await?;
    assert!(page.windows(2).all(|w| w[0].id < w[1].id), "ids must ascend");
    assert!(page.iter().any(|u| u.id == id));

    assert!(store.delete(id).await?);
    assert!(store.get(id).await?.is_none());
    assert!(!store.delete(id).await?);
    assert!(!store.update(&changed).await?);
    Ok(())
}

#[tokio::test]
async fn postgres_rejects_negative_offset() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };

    let err = store.list(-10, 10).await.unwrap_err();
    assert!(matches!(err, StoreError::Sqlx(_)));
    assert!(store.ping().await.is_ok());
    Ok(())
}
