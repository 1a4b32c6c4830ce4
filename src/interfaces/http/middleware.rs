//! Session middleware, auth extractors and the page route guard

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::common::ApiError;
use super::state::AppState;
use crate::domain::User;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "auth-token";

/// The user behind the current request, re-read from storage.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// A `CurrentUser` with the ADMIN role.
#[derive(Clone, Debug)]
pub struct AdminUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(ApiError::unauthorized)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(AdminUser(user))
        } else {
            Err(ApiError::forbidden())
        }
    }
}

/// Resolve the session cookie or answer 401.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value())
        .filter(|v| !v.is_empty());

    let Some(token) = token else {
        return ApiError::unauthorized().into_response();
    };

    match state.sessions.resolve_user(token).await {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        None => ApiError::unauthorized().into_response(),
    }
}

const IMAGE_EXTENSIONS: [&str; 7] = [".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico"];

fn under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Paths a browser may open without a session cookie.
pub fn is_public_path(path: &str) -> bool {
    if matches!(path, "/" | "/auth/login" | "/favicon.ico" | "/health" | "/metrics") {
        return true;
    }
    if ["/certificate", "/static", "/_next", "/docs", "/api-docs"]
        .iter()
        .any(|prefix| under(path, prefix))
    {
        return true;
    }
    let lower = path.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Redirect page navigations without a session cookie to the login page.
///
/// Only checks that the cookie is present; API routes verify the token
/// themselves.
pub async fn route_guard(jar: CookieJar, request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_owned();

    if under(&path, "/api") || is_public_path(&path) {
        return next.run(request).await;
    }

    let has_session = jar
        .get(SESSION_COOKIE)
        .is_some_and(|c| !c.value().is_empty());
    if has_session {
        return next.run(request).await;
    }

    let target = format!("/auth/login?redirect={}", urlencoding::encode(&path));
    Redirect::to(&target).into_response()
}
