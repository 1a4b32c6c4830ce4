//! Student DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::StudentProfile;
use crate::domain::{CreateStudentDto, DomainResult, Student, UpdateStudentDto};
use crate::interfaces::http::modules::certificates::CertificateDto;
use crate::interfaces::http::common::{not_blank, nullable};
use crate::shared::{non_blank, parse_optional_datetime, patch_datetime, patch_text};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
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

impl From<Student> for StudentDto {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            nim: s.nim,
            name: s.name,
            email: s.email,
            phone: s.phone,
            address: s.address,
            date_of_birth: s.date_of_birth,
            year: s.year,
            major: s.major,
            enrollment_date: s.enrollment_date,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// A student with their certificates, newest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetailDto {
    #[serde(flatten)]
    pub student: StudentDto,
    pub certificates: Vec<CertificateDto>,
}

impl From<StudentProfile> for StudentDetailDto {
    fn from(p: StudentProfile) -> Self {
        Self {
            student: StudentDto::from(p.student),
            certificates: p.certificates.into_iter().map(CertificateDto::from).collect(),
        }
    }
}

/// Student list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListStudentsParams {
    /// Case-insensitive match on name, NIM or major
    pub search: Option<String>,
}

/// Create body. Dates accept `YYYY-MM-DD` or RFC 3339.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "NIM is required"))]
    pub nim: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Major is required"))]
    pub major: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub year: Option<String>,
    pub enrollment_date: Option<String>,
}

impl StudentRequest {
    pub fn into_create(self) -> DomainResult<CreateStudentDto> {
        Ok(CreateStudentDto {
            date_of_birth: parse_optional_datetime("dateOfBirth", self.date_of_birth.as_deref())?,
            enrollment_date: parse_optional_datetime(
                "enrollmentDate",
                self.enrollment_date.as_deref(),
            )?,
            nim: self.nim.trim().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            major: self.major.trim().to_string(),
            phone: non_blank(self.phone),
            address: non_blank(self.address),
            year: non_blank(self.year),
        })
    }
}

/// Update body. The required fields are required again; an absent optional
/// field keeps its value, `null` or `""` clears it. A blank enrollment date
/// keeps the stored one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "NIM is required"))]
    pub nim: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Major is required"))]
    pub major: String,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub date_of_birth: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub year: Option<Option<String>>,
    pub enrollment_date: Option<String>,
}

impl UpdateStudentRequest {
    pub fn into_dto(self) -> DomainResult<UpdateStudentDto> {
        Ok(UpdateStudentDto {
            date_of_birth: patch_datetime("dateOfBirth", self.date_of_birth)?,
            enrollment_date: parse_optional_datetime(
                "enrollmentDate",
                self.enrollment_date.as_deref(),
            )?,
            nim: Some(self.nim.trim().to_string()),
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            major: Some(self.major.trim().to_string()),
            phone: patch_text(self.phone),
            address: patch_text(self.address),
            year: patch_text(self.year),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> StudentRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn minimal_body_is_valid() {
        let req = request(serde_json::json!({
            "nim": "99999999",
            "name": "Test User",
            "major": "Test",
            "email": "t@example.com"
        }));
        assert!(req.validate().is_ok());

        let dto = req.into_create().unwrap();
        assert!(dto.enrollment_date.is_none());
        assert!(dto.phone.is_none());
    }

    #[test]
    fn missing_nim_and_bad_email_fail_validation() {
        let req = request(serde_json::json!({
            "name": "Test User",
            "major": "Test",
            "email": "nope"
        }));
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("nim"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn dates_and_blank_optionals_are_normalised() {
        let req = request(serde_json::json!({
            "nim": "1",
            "name": "Budi",
            "major": "Sipil",
            "email": "b@example.com",
            "phone": "",
            "dateOfBirth": "2001-02-03",
            "enrollmentDate": "2021-09-01T00:00:00Z"
        }));
        let dto = req.into_create().unwrap();
        assert!(dto.phone.is_none());
        assert_eq!(
            dto.date_of_birth.unwrap().to_rfc3339(),
            "2001-02-03T00:00:00+00:00"
        );
        assert!(dto.enrollment_date.is_some());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let req = request(serde_json::json!({
            "nim": "1",
            "name": "Budi",
            "major": "Sipil",
            "email": "b@example.com",
            "dateOfBirth": "03/02/2001"
        }));
        assert!(req.into_create().is_err());
    }

    #[test]
    fn whitespace_required_fields_fail_validation() {
        let req = request(serde_json::json!({
            "nim": "   ",
            "name": " ",
            "major": "\n",
            "email": "b@example.com"
        }));
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("nim"));
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("major"));

        let update: UpdateStudentRequest = serde_json::from_value(serde_json::json!({
            "nim": "1",
            "name": "  ",
            "major": "Sipil",
            "email": "b@example.com"
        }))
        .unwrap();
        assert!(update.validate().unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn update_keeps_absent_and_clears_null_or_empty() {
        let update: UpdateStudentRequest = serde_json::from_value(serde_json::json!({
            "nim": "1",
            "name": "Budi",
            "major": "Sipil",
            "email": "b@example.com",
            "phone": null,
            "address": "",
            "dateOfBirth": null
        }))
        .unwrap();
        let dto = update.into_dto().unwrap();
        assert_eq!(dto.phone, Some(None));
        assert_eq!(dto.address, Some(None));
        assert_eq!(dto.date_of_birth, Some(None));
        assert_eq!(dto.year, None);
        assert_eq!(dto.enrollment_date, None);
    }
}
