//! Domain error to HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Handler error. Every variant renders as the standard error envelope.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn unauthorized() -> Self {
        Self(DomainError::Unauthorized("Unauthorized".into()))
    }

    pub fn forbidden() -> Self {
        Self(DomainError::Forbidden("Forbidden".into()))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(DomainError::Validation(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) | DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            DomainError::Storage(detail) => {
                error!(error = %detail, "Request failed with a storage error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (DomainError::not_found("Student", "x"), StatusCode::NOT_FOUND),
            (DomainError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("c".into()), StatusCode::BAD_REQUEST),
            (DomainError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("f".into()), StatusCode::FORBIDDEN),
            (DomainError::Storage("s".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[tokio::test]
    async fn storage_details_are_not_leaked() {
        use http_body_util::BodyExt;

        let response = ApiError(DomainError::Storage("disk on fire at /var/db".into())).into_response();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Internal server error"));
        assert!(!text.contains("disk on fire"));
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(
            DomainError::not_found("Certificate", "abc").to_string(),
            "Certificate not found"
        );
    }
}
