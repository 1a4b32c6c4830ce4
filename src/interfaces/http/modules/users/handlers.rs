//! User management API handlers
//!
//! Admin-only account management, except that any user may read their
//! own record. Delegates to `UserService`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{parse_role, CreateUserRequest, UpdateUserRequest, UserDto};
use crate::application::{AccountChanges, NewAccount};
use crate::interfaces::http::common::{
    ApiError, ApiResponse, ApiResult, MessageResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::{AdminUser, CurrentUser};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<UserDto>>>> {
    let users = state.users.list().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Neither admin nor the user themself"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    if !caller.is_admin() && caller.id != id {
        return Err(ApiError::forbidden());
    }

    let user = state.users.get(&id).await?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    security(("session_cookie" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Missing fields or username taken"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserDto>>)> {
    let role = parse_role(request.role.as_deref())?.unwrap_or_default();

    let user = state
        .users
        .create(NewAccount {
            username: request.username.trim().to_string(),
            password: request.password,
            name: request.name.trim().to_string(),
            role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Missing fields or username taken"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let changes = AccountChanges {
        username: Some(request.username.trim().to_string()),
        name: Some(request.name.trim().to_string()),
        role: parse_role(request.role.as_deref())?,
        password: request.password,
    };

    let user = state.users.update(&id, changes).await?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<MessageResponse>),
        (status = 400, description = "Attempt to delete own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(caller): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.users.delete(&caller, &id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "User deleted successfully",
    ))))
}
