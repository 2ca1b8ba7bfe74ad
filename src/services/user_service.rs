use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::api::requests::{field_errors, CreateUserRequest, FieldErrors, ListUsersQuery, UpdateUserRequest};
use crate::database::models::{NewUser, User};
use crate::database::store::{StoreError, UserStore};

/// Outcomes of user operations other than success.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("One or more validation errors occurred.")]
    Validation(FieldErrors),

    #[error("ID mismatch.")]
    IdMismatch { path: i32, body: i32 },

    #[error("User with ID {0} not found.")]
    NotFound(i32),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Business rules for the user resource. Depends only on the store port.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// One page of users in id order. `page` and `pageSize` are not clamped.
    #[instrument(name = "users.service.list", skip(self))]
    pub async fn list_users(&self, query: ListUsersQuery) -> Result<Vec<User>, UserError> {
        let users = self.store.list(query.offset(), query.page_size).await?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "users.service.get", skip(self))]
    pub async fn get_user(&self, id: i32) -> Result<User, UserError> {
        self.store.get(id).await?.ok_or(UserError::NotFound(id))
    }

    #[instrument(name = "users.service.create", skip_all)]
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserError> {
        validate(&req)?;

        let new_user = NewUser::new(req.first_name, req.last_name, req.email, req.department);
        let id = self.store.insert(new_user.clone()).await?;

        info!(user_id = id, "Created user");
        Ok(new_user.into_user(id))
    }

    /// Overwrite the mutable fields of an existing user. `id` and
    /// `created_at` are never touched.
    #[instrument(name = "users.service.update", skip(self, req))]
    pub async fn update_user(&self, id: i32, req: UpdateUserRequest) -> Result<(), UserError> {
        validate(&req)?;
        if id != req.id {
            return Err(UserError::IdMismatch { path: id, body: req.id });
        }

        let mut user = self.get_user(id).await?;
        user.first_name = req.first_name;
        user.last_name = req.last_name;
        user.email = req.email;
        user.department = req.department;

        // Deleted between the read and the write.
        if !self.store.update(&user).await? {
            return Err(UserError::NotFound(id));
        }

        info!("Updated user");
        Ok(())
    }

    #[instrument(name = "users.service.delete", skip(self))]
    pub async fn delete_user(&self, id: i32) -> Result<(), UserError> {
        self.get_user(id).await?;

        if !self.store.delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        info!("Deleted user");
        Ok(())
    }
}

fn validate<T: Validate>(req: &T) -> Result<(), UserError> {
    req.validate()
        .map_err(|errors| UserError::Validation(field_errors(&errors)))
}
