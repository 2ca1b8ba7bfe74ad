use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::database::manager::DatabaseManager;
use crate::database::models::{NewUser, User};
use crate::database::store::{StoreError, UserStore};

const USER_COLUMNS: &str = "id, first_name, last_name, email, department, created_at";

/// Postgres-backed [`UserStore`] over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(name = "store.users.insert", skip_all)]
    async fn insert(&self, user: NewUser) -> Result<i32, StoreError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO users (first_name, last_name, email, department, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.department)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[instrument(name = "store.users.get", skip(self))]
    async fn get(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(name = "store.users.list", skip(self))]
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, StoreError> {
        // Negative values reach Postgres as-is and come back as a query error.
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    #[instrument(name = "store.users.update", skip_all, fields(user_id = user.id))]
    async fn update(&self, user: &User) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE users
             SET first_name = $2, last_name = $3, email = $4, department = $5
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.department)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(name = "store.users.delete", skip(self))]
    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        DatabaseManager::health_check(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}
