use actix_web::{post, web, HttpResponse, Responder};
use tracing::{error, info, warn};

use crate::{
    api::schemas::{ErrorResponse, SuccessResponse},
    auth::adapter::incoming::web::extractors::StaffUser,
    shared::api::ApiResponse,
    verification::{
        adapter::incoming::web::dto::{receipt_details, CheckInResponse},
        application::{
            domain::entities::VerificationToken,
            ports::incoming::use_cases::VerifyTokenError,
        },
    },
    AppState,
};

/// Check a subject in
///
/// Honors a code at most once. The acting staff member is taken from the
/// bearer token and recorded as `verified_by`.
#[utoipa::path(
    post,
    path = "/api/admin/verify/{token}",
    tag = "check-in",
    params(("token" = String, Path, description = "Token from the scanned code")),
    responses(
        (status = 200, description = "Checked in", body = inline(SuccessResponse<CheckInResponse>)),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "Invalid QR code", body = ErrorResponse),
        (status = 409, description = "Already used, or expired/rejected", body = ErrorResponse),
        (status = 422, description = "Subject not eligible", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/admin/verify/{token}")]
pub async fn verify_token_handler(
    staff: StaffUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let token = VerificationToken::from(path.into_inner());

    match data
        .verification
        .verify
        .execute(token.clone(), staff.user_id)
        .await
    {
        Ok(success) => {
            info!(token = %token, staff = %staff.user_id, "Check-in committed");
            ApiResponse::success(CheckInResponse::new(&success.record, success.names))
        }
        Err(err) => map_verify_error(err, &token),
    }
}

fn map_verify_error(err: VerifyTokenError, token: &VerificationToken) -> HttpResponse {
    match err {
        VerifyTokenError::NotFound => ApiResponse::not_found("INVALID_QR_CODE", "Invalid QR code"),
        VerifyTokenError::AlreadyUsed(receipt) => ApiResponse::conflict_with_details(
            "ALREADY_USED",
            "This code has already been used",
            receipt_details(&receipt),
        ),
        VerifyTokenError::InvalidState(status) => ApiResponse::conflict(
            "INVALID_STATE",
            &format!("This code is {} and can no longer be used", status.as_str()),
        ),
        VerifyTokenError::Ineligible(reason) => {
            warn!(token = %token, reason = %reason, "Check-in refused");
            ApiResponse::unprocessable("NOT_ELIGIBLE", &reason)
        }
        VerifyTokenError::RepositoryError(msg) => {
            error!(token = %token, error = %msg, "Check-in failed");
            ApiResponse::internal_error()
        }
    }
}
