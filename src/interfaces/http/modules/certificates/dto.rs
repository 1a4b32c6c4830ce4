//! Certificate DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    Certificate, CertificateDetails, CertificateStatus, CreateCertificateDto, DomainError,
    DomainResult, GetCertificateDto, UpdateCertificateDto,
};
use crate::interfaces::http::modules::students::StudentDto;
use crate::interfaces::http::common::{not_blank, nullable};
use crate::shared::{non_blank, parse_optional_datetime, patch_datetime, patch_text};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub student_id: String,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub file_url: Option<String>,
    /// `PENDING`, `ISSUED`, `REVOKED` or `EXPIRED`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Certificate> for CertificateDto {
    fn from(c: Certificate) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            student_id: c.student_id,
            issue_date: c.issue_date,
            expiry_date: c.expiry_date,
            file_url: c.file_url,
            status: c.status.as_str().to_string(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// A certificate with its owning student embedded
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDetailDto {
    #[serde(flatten)]
    pub certificate: CertificateDto,
    pub student: Option<StudentDto>,
}

impl From<CertificateDetails> for CertificateDetailDto {
    fn from(d: CertificateDetails) -> Self {
        Self {
            certificate: CertificateDto::from(d.certificate),
            student: d.student.map(StudentDto::from),
        }
    }
}

/// Certificate list filters; all optional and combined with AND.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListCertificatesParams {
    /// Case-insensitive match on title, student name or NIM
    pub search: Option<String>,
    /// Exact status; anything else is ignored
    pub status: Option<String>,
    pub student_id: Option<String>,
}

impl From<ListCertificatesParams> for GetCertificateDto {
    fn from(p: ListCertificatesParams) -> Self {
        Self {
            search: p.search,
            status: p.status.as_deref().and_then(CertificateStatus::parse),
            student_id: non_blank(p.student_id),
        }
    }
}

fn parse_status(raw: Option<&str>) -> DomainResult<Option<CertificateStatus>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => CertificateStatus::parse(s).map(Some).ok_or_else(|| {
            DomainError::Validation(
                "Status must be one of PENDING, ISSUED, REVOKED, EXPIRED".into(),
            )
        }),
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificateRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Student ID is required"))]
    pub student_id: String,
    pub description: Option<String>,
    /// Defaults to now
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub file_url: Option<String>,
    /// Defaults to `PENDING`
    pub status: Option<String>,
}

impl CreateCertificateRequest {
    pub fn into_dto(self) -> DomainResult<CreateCertificateDto> {
        Ok(CreateCertificateDto {
            issue_date: parse_optional_datetime("issueDate", self.issue_date.as_deref())?,
            expiry_date: parse_optional_datetime("expiryDate", self.expiry_date.as_deref())?,
            status: parse_status(self.status.as_deref())?,
            title: self.title.trim().to_string(),
            student_id: self.student_id.trim().to_string(),
            description: non_blank(self.description),
            file_url: non_blank(self.file_url),
        })
    }
}

/// Partial update; omitted fields keep their stored value. `null` or `""`
/// clears `description`, `expiryDate` and `fileUrl`.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCertificateRequest {
    #[validate(custom(function = "not_blank", message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank", message = "Student ID cannot be empty"))]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub issue_date: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub file_url: Option<Option<String>>,
    pub status: Option<String>,
}

impl UpdateCertificateRequest {
    pub fn into_dto(self) -> DomainResult<UpdateCertificateDto> {
        Ok(UpdateCertificateDto {
            issue_date: parse_optional_datetime("issueDate", self.issue_date.as_deref())?,
            expiry_date: patch_datetime("expiryDate", self.expiry_date)?,
            status: parse_status(self.status.as_deref())?,
            title: self.title.map(|t| t.trim().to_string()),
            student_id: self.student_id.map(|s| s.trim().to_string()),
            description: patch_text(self.description),
            file_url: patch_text(self.file_url),
        })
    }
}
