use super::UserRole;

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub username: Option<String>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub password_hash: Option<String>,
}
