//! Shared HTTP plumbing: response envelope, error mapping, validated bodies

pub mod api_response;
pub mod error;
pub mod fields;
pub mod validated_json;

pub use api_response::{ApiResponse, MessageResponse};
pub use error::{ApiError, ApiResult};
pub use fields::{not_blank, nullable};
pub use validated_json::ValidatedJson;
