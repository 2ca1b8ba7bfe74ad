use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Persisted user record. Serialized with camelCase keys on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

/// A user that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Stamps `created_at` with the current time at microsecond precision,
    /// the resolution Postgres keeps for `timestamptz`.
    pub fn new(first_name: String, last_name: String, email: String, department: String) -> Self {
        Self {
            first_name,
            last_name,
            email,
            department,
            created_at: ceil_to_micros(Utc::now()),
        }
    }

    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: self.department,
            created_at: self.created_at,
        }
    }
}

/// Round up so the stored value is never earlier than `at`.
fn ceil_to_micros(at: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = at.trunc_subsecs(6);
    if truncated < at {
        truncated + Duration::microseconds(1)
    } else {
        truncated
    }
}
