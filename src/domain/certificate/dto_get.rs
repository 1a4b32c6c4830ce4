use super::CertificateStatus;

#[derive(Debug, Clone, Default)]
pub struct GetCertificateDto {
    /// Case-insensitive substring over title, description, student name and NIM.
    pub search: Option<String>,
    pub status: Option<CertificateStatus>,
    pub student_id: Option<String>,
}
