pub mod openapi;
pub mod requests;

pub use openapi::{ApiDoc, OPENAPI_JSON_PATH};
pub use requests::{CreateUserRequest, FieldErrors, ListUsersQuery, UpdateUserRequest};
