use chrono::{DateTime, Utc};

use crate::shared::contains_ci;

/// Certificate recipient, identified publicly by NIM (student number).
#[derive(Debug, Clone)]
pub struct Student {
    pub id: String,
    pub nim: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub year: Option<String>,
    pub major: String,
    pub enrollment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// `needle` must already be lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.nim, needle)
            || contains_ci(&self.major, needle)
    }
}
