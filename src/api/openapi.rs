use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::requests::{CreateUserRequest, UpdateUserRequest};
use crate::database::models::User;
use crate::handlers::users;

/// Path of the generated document. Lives under the auth-exempt prefix.
pub const OPENAPI_JSON_PATH: &str = "/swagger/v1/swagger.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "User Management API"),
    paths(
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user
    ),
    components(schemas(User, CreateUserRequest, UpdateUserRequest)),
    modifiers(&BearerSecurity),
    tags((name = "Users", description = "User CRUD operations"))
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
