use chrono::{DateTime, Utc};

/// Partial update; `None` leaves the stored value untouched. For the
/// optional columns `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct UpdateStudentDto {
    pub nim: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub date_of_birth: Option<Option<DateTime<Utc>>>,
    pub year: Option<Option<String>>,
    pub major: Option<String>,
    pub enrollment_date: Option<DateTime<Utc>>,
}
