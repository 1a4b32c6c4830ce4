//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{User, UserRole};
use crate::interfaces::http::common::{not_blank, ApiError};

/// User API representation. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub name: String,
    /// `ADMIN` or `STAFF`
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            role: u.role.as_str().to_string(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// `ADMIN` or `STAFF` (default)
    pub role: Option<String>,
}

/// Update user request. A blank password keeps the current one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    pub password: Option<String>,
    pub role: Option<String>,
}

pub fn parse_role(raw: Option<&str>) -> Result<Option<UserRole>, ApiError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(None),
        Some(r) => UserRole::parse(r)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request("Role must be ADMIN or STAFF")),
    }
}
