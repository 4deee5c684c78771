// src/api/schemas.rs
use serde::Serialize;
use utoipa::ToSchema;

/// Standard success response wrapper
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    /// Always true for successful responses
    #[schema(example = true)]
    pub success: bool,
    /// Response data
    pub data: T,
}

/// Standard error response wrapper
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    #[schema(example = false)]
    pub success: bool,
    /// Error details
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    #[schema(example = "ALREADY_USED")]
    pub code: String,

    /// Human-readable error message
    #[schema(example = "This code has already been used")]
    pub message: String,

    /// Present on `ALREADY_USED` and `ALREADY_VERIFIED`: when and by whom
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}
