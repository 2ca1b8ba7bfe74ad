use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{NewUser, User};

/// Errors raised by a [`UserStore`] implementation.
///
/// None of these are business outcomes: a missing record is reported through
/// `Option`/`bool` returns, so every variant here maps to a server error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Id-keyed persistence for user records.
///
/// Each call is a single atomic unit; implementations never leave a record
/// partially written.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new record and return the id assigned to it. Ids are never
    /// reused within the lifetime of the store.
    async fn insert(&self, user: NewUser) -> Result<i32, StoreError>;

    /// Load a record by id.
    async fn get(&self, id: i32) -> Result<Option<User>, StoreError>;

    /// Up to `limit` records starting at `offset`, in ascending id order.
    /// Values are passed through as given; negative ones are rejected.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, StoreError>;

    /// Replace the stored record with the same id. Returns `false` if absent.
    async fn update(&self, user: &User) -> Result<bool, StoreError>;

    /// Remove a record. Returns `false` if absent.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
