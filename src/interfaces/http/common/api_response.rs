use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard response wrapper.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "message"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Payload for operations that only report an outcome
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_shapes() {
        let ok = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(ok, json!({"success": true, "data": 1}));

        let err = serde_json::to_value(ApiResponse::<()>::error("Forbidden")).unwrap();
        assert_eq!(err, json!({"success": false, "error": "Forbidden"}));
    }
}
