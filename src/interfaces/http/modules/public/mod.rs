//! Unauthenticated certificate verification
//!
//! Exposes a reduced view of a certificate and its holder; contact details
//! and audit timestamps stay private.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::VerifiedCertificate;
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicStudentDto {
    pub id: String,
    pub nim: String,
    pub name: String,
    pub major: String,
    pub enrollment_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicCertificateDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub status: String,
    pub student: PublicStudentDto,
}

impl From<VerifiedCertificate> for PublicCertificateDto {
    fn from(v: VerifiedCertificate) -> Self {
        let VerifiedCertificate { certificate: c, student: s } = v;
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            issue_date: c.issue_date,
            expiry_date: c.expiry_date,
            status: c.status.as_str().to_string(),
            student: PublicStudentDto {
                id: s.id,
                nim: s.nim,
                name: s.name,
                major: s.major,
                enrollment_date: s.enrollment_date,
            },
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub certificate_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/public/certificates/{id}",
    tag = "Public",
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Public certificate view", body = ApiResponse<PublicCertificateDto>),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn public_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<PublicCertificateDto>>> {
    let verified = state.certificates.verify(&id).await?;
    Ok(Json(ApiResponse::success(PublicCertificateDto::from(
        verified,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/public/verify",
    tag = "Public",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Certificate exists", body = ApiResponse<PublicCertificateDto>),
        (status = 400, description = "Certificate ID is required"),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn verify_certificate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyRequest>,
) -> ApiResult<Json<ApiResponse<PublicCertificateDto>>> {
    let id = request
        .certificate_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Certificate ID is required"))?;

    tracing::debug!(certificate_id = %id, "Public verification");
    let verified = state.certificates.verify(id).await?;
    Ok(Json(ApiResponse::success(PublicCertificateDto::from(
        verified,
    ))))
}
