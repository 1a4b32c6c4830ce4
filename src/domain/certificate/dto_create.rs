use chrono::{DateTime, Utc};

use super::CertificateStatus;

#[derive(Debug, Clone)]
pub struct CreateCertificateDto {
    pub title: String,
    pub description: Option<String>,
    pub student_id: String,
    /// Defaults to the creation time.
    pub issue_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub file_url: Option<String>,
    /// Defaults to `Pending`.
    pub status: Option<CertificateStatus>,
}
