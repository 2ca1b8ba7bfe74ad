use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

/// Field-level validation failures: field name → messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Body of `POST /api/users`.
///
/// Missing fields deserialize to empty strings so they are reported by
/// validation alongside every other violated field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "The FirstName field is required."),
        length(max = 100, message = "The FirstName field must be at most 100 characters.")
    )]
    pub first_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "The LastName field is required."),
        length(max = 100, message = "The LastName field must be at most 100 characters.")
    )]
    pub last_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "The Email field is required."),
        email(message = "The Email field is not a valid e-mail address.")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "The Department field is required."))]
    pub department: String,
}

/// Body of `PUT /api/users/{id}`. `id` must match the path id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub id: i32,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "The FirstName field is required."),
        length(max = 100, message = "The FirstName field must be at most 100 characters.")
    )]
    pub first_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "The LastName field is required."),
        length(max = 100, message = "The LastName field must be at most 100 characters.")
    )]
    pub last_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "The Email field is required."),
        email(message = "The Email field is not a valid e-mail address.")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "The Department field is required."))]
    pub department: String,
}

/// Query string of `GET /api/users`. Values are not clamped.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number (default 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Records per page (default 10)
    #[serde(default = "default_page_size", rename = "pageSize")]
    pub page_size: i64,
}

impl ListUsersQuery {
    /// `(page - 1) * pageSize`, saturating instead of overflowing.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Required text: empty and whitespace-only values are rejected.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Flatten `validator` output into a stable, camelCase-keyed map.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("invalid value ({})", e.code),
                })
                .collect();
            (camel_case(&field.to_string()), messages)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
