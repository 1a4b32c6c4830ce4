//! Authentication API handlers

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::dto::{LoginRequest, LoginResponse};
use crate::interfaces::http::common::{ApiResponse, ApiResult, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::{CurrentUser, SESSION_COOKIE};
use crate::interfaces::http::modules::users::UserDto;
use crate::interfaces::http::state::{AppState, CookieSettings};

fn session_cookie(token: String, settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(settings.max_age_secs))
        .build()
}

fn expired_cookie(settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let outcome = state
        .sessions
        .login(&request.username, &request.password)
        .await?;

    let jar = jar.add(session_cookie(outcome.token, &state.cookies));
    let body = LoginResponse {
        user: UserDto::from(outcome.user),
        expires_in: outcome.expires_in,
    };
    Ok((jar, Json(ApiResponse::success(body))))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session cookie cleared", body = ApiResponse<MessageResponse>)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar.add(expired_cookie(&state.cookies));
    (
        jar,
        Json(ApiResponse::success(MessageResponse::new(
            "Logged out successfully",
        ))),
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<UserDto>> {
    Json(ApiResponse::success(UserDto::from(user)))
}
