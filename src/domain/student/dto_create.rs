use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct CreateStudentDto {
    pub nim: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub year: Option<String>,
    pub major: String,
    /// Defaults to the creation time.
    pub enrollment_date: Option<DateTime<Utc>>,
}
