//! Certificate API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CertificateDetailDto, CertificateDto, CreateCertificateRequest, ListCertificatesParams,
    UpdateCertificateRequest,
};
use crate::interfaces::http::common::{ApiResponse, ApiResult, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/certificates",
    tag = "Certificates",
    security(("session_cookie" = [])),
    params(ListCertificatesParams),
    responses(
        (status = 200, description = "Certificates, newest first", body = ApiResponse<Vec<CertificateDetailDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_certificates(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListCertificatesParams>,
) -> ApiResult<Json<ApiResponse<Vec<CertificateDetailDto>>>> {
    let certificates = state.certificates.list(params.into()).await?;
    Ok(Json(ApiResponse::success(
        certificates
            .into_iter()
            .map(CertificateDetailDto::from)
            .collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/certificates/{id}",
    tag = "Certificates",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Certificate with student", body = ApiResponse<CertificateDetailDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn get_certificate(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<CertificateDetailDto>>> {
    let details = state.certificates.get(&id).await?;
    Ok(Json(ApiResponse::success(CertificateDetailDto::from(details))))
}

#[utoipa::path(
    post,
    path = "/api/certificates",
    tag = "Certificates",
    security(("session_cookie" = [])),
    request_body = CreateCertificateRequest,
    responses(
        (status = 201, description = "Certificate created", body = ApiResponse<CertificateDto>),
        (status = 400, description = "Missing title or student ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn create_certificate(
    State(state): State<AppState>,
    _user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateCertificateRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CertificateDto>>)> {
    let certificate = state.certificates.create(request.into_dto()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CertificateDto::from(certificate))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/certificates/{id}",
    tag = "Certificates",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Certificate ID")),
    request_body = UpdateCertificateRequest,
    responses(
        (status = 200, description = "Certificate updated", body = ApiResponse<CertificateDto>),
        (status = 400, description = "Invalid field"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Certificate or student not found")
    )
)]
pub async fn update_certificate(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCertificateRequest>,
) -> ApiResult<Json<ApiResponse<CertificateDto>>> {
    let certificate = state.certificates.update(&id, request.into_dto()?).await?;
    Ok(Json(ApiResponse::success(CertificateDto::from(certificate))))
}

#[utoipa::path(
    delete,
    path = "/api/certificates/{id}",
    tag = "Certificates",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Certificate deleted", body = ApiResponse<MessageResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn delete_certificate(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.certificates.delete(&id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Certificate deleted successfully",
    ))))
}
