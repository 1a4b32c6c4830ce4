use chrono::{DateTime, Utc};

use super::CertificateStatus;

/// Partial update; `None` leaves the stored value untouched. For the
/// optional columns `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct UpdateCertificateDto {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub student_id: Option<String>,
    pub issue_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<Option<DateTime<Utc>>>,
    pub file_url: Option<Option<String>>,
    pub status: Option<CertificateStatus>,
}
