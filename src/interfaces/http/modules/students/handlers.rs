//! Student API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    ListStudentsParams, StudentDetailDto, StudentDto, StudentRequest, UpdateStudentRequest,
};
use crate::interfaces::http::common::{ApiResponse, ApiResult, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/students",
    tag = "Students",
    security(("session_cookie" = [])),
    params(ListStudentsParams),
    responses(
        (status = 200, description = "Students ordered by name", body = ApiResponse<Vec<StudentDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListStudentsParams>,
) -> ApiResult<Json<ApiResponse<Vec<StudentDto>>>> {
    let students = state.students.list(params.search).await?;
    Ok(Json(ApiResponse::success(
        students.into_iter().map(StudentDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "Students",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student with certificates", body = ApiResponse<StudentDetailDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<StudentDetailDto>>> {
    let profile = state.students.profile(&id).await?;
    Ok(Json(ApiResponse::success(StudentDetailDto::from(profile))))
}

#[utoipa::path(
    post,
    path = "/api/students",
    tag = "Students",
    security(("session_cookie" = [])),
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = ApiResponse<StudentDto>),
        (status = 400, description = "Missing fields or NIM taken"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    ValidatedJson(request): ValidatedJson<StudentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<StudentDto>>)> {
    let student = state.students.create(request.into_create()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(StudentDto::from(student))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    tag = "Students",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = ApiResponse<StudentDto>),
        (status = 400, description = "Missing fields or NIM taken"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStudentRequest>,
) -> ApiResult<Json<ApiResponse<StudentDto>>> {
    let student = state.students.update(&id, request.into_dto()?).await?;
    Ok(Json(ApiResponse::success(StudentDto::from(student))))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "Students",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = ApiResponse<MessageResponse>),
        (status = 400, description = "Student still has certificates"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.students.delete(&id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Student deleted successfully",
    ))))
}
