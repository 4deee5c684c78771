use actix_web::{get, web, HttpResponse, Responder};
use tracing::{error, info};

use crate::{
    api::schemas::{ErrorResponse, SuccessResponse},
    auth::adapter::incoming::web::extractors::StaffUser,
    shared::api::ApiResponse,
    verification::{
        adapter::incoming::web::dto::PreviewResponse,
        application::{
            domain::entities::VerificationToken,
            ports::incoming::use_cases::PreviewVerificationError,
        },
    },
    AppState,
};

/// Preview a scanned code
///
/// Shows the record, its status and who it belongs to without checking the
/// subject in.
#[utoipa::path(
    get,
    path = "/api/admin/verify/{token}",
    tag = "check-in",
    params(("token" = String, Path, description = "Token from the scanned code")),
    responses(
        (status = 200, description = "Preview", body = inline(SuccessResponse<PreviewResponse>)),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "Invalid QR code", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/admin/verify/{token}")]
pub async fn preview_verification_handler(
    staff: StaffUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let token = VerificationToken::from(path.into_inner());

    match data.verification.preview.execute(token.clone()).await {
        Ok(preview) => {
            info!(token = %token, staff = %staff.user_id, "Code previewed");
            ApiResponse::success(PreviewResponse::new(
                &preview.record,
                preview.names,
                preview.eligibility,
            ))
        }
        Err(err) => map_preview_error(err),
    }
}

fn map_preview_error(err: PreviewVerificationError) -> HttpResponse {
    match err {
        PreviewVerificationError::NotFound => {
            ApiResponse::not_found("INVALID_QR_CODE", "Invalid QR code")
        }
        PreviewVerificationError::RepositoryError(msg) => {
            error!("Preview failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
