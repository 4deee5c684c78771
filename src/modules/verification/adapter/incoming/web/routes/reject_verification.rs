use actix_web::{post, web, HttpResponse, Responder};
use tracing::{error, info};

use crate::{
    api::schemas::{ErrorResponse, SuccessResponse},
    auth::adapter::incoming::web::extractors::StaffUser,
    shared::api::ApiResponse,
    verification::{
        adapter::incoming::web::dto::receipt_details,
        application::{
            domain::entities::VerificationToken,
            ports::incoming::use_cases::InvalidateVerificationError,
            presenter::{render_status, VerificationView},
        },
    },
    AppState,
};

/// Reject a code at the desk
#[utoipa::path(
    post,
    path = "/api/admin/verifications/{token}/reject",
    tag = "check-in",
    params(("token" = String, Path, description = "Token from the scanned code")),
    responses(
        (status = 200, description = "Code rejected", body = inline(SuccessResponse<VerificationView>)),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "Invalid QR code", body = ErrorResponse),
        (status = 409, description = "Code is no longer active", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/admin/verifications/{token}/reject")]
pub async fn reject_verification_handler(
    staff: StaffUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let token = VerificationToken::from(path.into_inner());

    match data
        .verification
        .invalidate
        .execute(token.clone(), staff.user_id)
        .await
    {
        Ok(record) => {
            info!(token = %token, staff = %staff.user_id, "Code rejected");
            ApiResponse::success(render_status(&record))
        }
        Err(err) => map_reject_error(err),
    }
}

fn map_reject_error(err: InvalidateVerificationError) -> HttpResponse {
    match err {
        InvalidateVerificationError::NotFound => {
            ApiResponse::not_found("INVALID_QR_CODE", "Invalid QR code")
        }
        InvalidateVerificationError::AlreadyUsed(receipt) => ApiResponse::conflict_with_details(
            "ALREADY_USED",
            "This code has already been used",
            receipt_details(&receipt),
        ),
        InvalidateVerificationError::InvalidState(status) => ApiResponse::conflict(
            "INVALID_STATE",
            &format!("This code is {} and can no longer be used", status.as_str()),
        ),
        InvalidateVerificationError::RepositoryError(msg) => {
            error!("Reject failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
