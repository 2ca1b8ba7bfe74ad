use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::database::models::{NewUser, User};
use crate::database::store::{StoreError, UserStore};

/// In-process store used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i32,
    users: BTreeMap<i32, User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<i32, StoreError> {
        let mut state = self.state.write().await;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Unavailable("user id sequence exhausted".to_string()))?;
        state.last_id = id;
        state.users.insert(id, user.into_user(id));
        debug!(user_id = id, "inserted user into memory store");
        Ok(id)
    }

    async fn get(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, StoreError> {
        // Mirror Postgres, which refuses negative OFFSET / LIMIT.
        if offset < 0 {
            return Err(StoreError::InvalidArgument(
                "OFFSET must not be negative".to_string(),
            ));
        }
        if limit < 0 {
            return Err(StoreError::InvalidArgument(
                "LIMIT must not be negative".to_string(),
            ));
        }

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        let state = self.state.read().await;
        Ok(state.users.values().skip(skip).take(take).cloned().collect())
    }

    async fn update(&self, user: &User) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.state.write().await.users.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(n: usize) -> NewUser {
        NewUser::new(
            format!("First{}", n),
            format!("Last{}", n),
            format!("user{}@example.com", n),
            "QA".to_string(),
        )
    }

    #[tokio::test]
    async fn assigns_sequential_ids_and_never_reuses_them() {
        let store = MemoryUserStore::new();
        let first = store.insert(new_user(1)).await.unwrap();
        let second = store.insert(new_user(2)).await.unwrap();
        assert_eq!((first, second), (1, 2));

        assert!(store.delete(second).await.unwrap());
        let third = store.insert(new_user(3)).await.unwrap();
        assert_eq!(third, 3);
    }

    #[tokio::test]
    async fn lists_in_id_order_with_offset_and_limit() {
        let store = MemoryUserStore::new();
        for n in 1..=10 {
            store.insert(new_user(n)).await.unwrap();
        }

        let ids: Vec<i32> = store
            .list(3, 3)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![4, 5, 6]);

        assert!(store.list(20, 5).await.unwrap().is_empty());
        assert!(store.list(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_negative_offset_and_limit() {
        let store = MemoryUserStore::new();
        assert!(matches!(
            store.list(-10, 10).await,
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.list(0, -1).await,
            Err(StoreError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn update_and_delete_report_absent_records() {
        let store = MemoryUserStore::new();
        let ghost = new_user(1).into_user(42);
        assert!(!store.update(&ghost).await.unwrap());
        assert!(!store.delete(42).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn update_replaces_stored_record() {
        let store = MemoryUserStore::new();
        let id = store.insert(new_user(1)).await.unwrap();
        let mut user = store.get(id).await.unwrap().unwrap();
        user.department = "Finance".to_string();

        assert!(store.update(&user).await.unwrap());
        assert_eq!(store.get(id).await.unwrap().unwrap().department, "Finance");
        assert_eq!(store.len().await, 1);
    }
}
