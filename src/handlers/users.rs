// handlers/users.rs - /api/users resource
//
// Thin adapters between axum extractors and UserService. Extractor failures
// are turned into ApiError so every 400 has the same JSON shape.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use crate::api::requests::{CreateUserRequest, ListUsersQuery, UpdateUserRequest};
use crate::app::AppState;
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/users?page=&pageSize= - one page of users in id order
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users on the requested page", body = [User]),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    ),
    security(("bearer" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> ApiResult<Vec<User>> {
    let Query(query) = query?;
    let users = state.users.list_users(query).await?;
    Ok(ApiResponse::success(users))
}

/// GET /api/users/:id - a single user
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No user with this id"),
        (status = 500, description = "Store failure")
    ),
    security(("bearer" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<User> {
    let Path(id) = id?;
    let user = state.users.get_user(id).await?;
    Ok(ApiResponse::success(user))
}

/// POST /api/users - create a user; responds with its location
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = User),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    ),
    security(("bearer" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<User> {
    let Json(payload) = payload?;
    let user = state.users.create_user(payload).await?;
    let location = user_location(user.id);
    Ok(ApiResponse::created(user, location))
}

/// PUT /api/users/:id - replace a user's mutable fields
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id; must equal the body id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation failed or ID mismatch"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No user with this id"),
        (status = 500, description = "Store failure")
    ),
    security(("bearer" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    state.users.update_user(id, payload).await?;
    Ok(ApiResponse::no_content())
}

/// DELETE /api/users/:id - remove a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No user with this id"),
        (status = 500, description = "Store failure")
    ),
    security(("bearer" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.users.delete_user(id).await?;
    Ok(ApiResponse::no_content())
}

/// Location of a user resource, as served by `get_user`.
pub fn user_location(id: i32) -> String {
    format!("/api/users/{}", id)
}
