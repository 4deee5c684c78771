use actix_web::{get, web, HttpResponse, Responder};
use tracing::error;

use crate::{
    api::schemas::ErrorResponse,
    auth::{
        adapter::incoming::web::extractors::AuthenticatedUser,
        application::domain::entities::Actor,
    },
    shared::api::ApiResponse,
    verification::{
        adapter::incoming::web::dto::PairRequest,
        application::ports::incoming::use_cases::IssueVerificationCommand,
    },
    AppState,
};

use super::get_current_verification::map_get_current_error;

/// Scannable QR code (SVG) for the pair's current code
#[utoipa::path(
    get,
    path = "/api/verifications/{subject_kind}/{subject_id}/{target_kind}/{target_id}/qr",
    tag = "verifications",
    params(PairRequest),
    responses(
        (status = 200, description = "SVG image", content_type = "image/svg+xml", body = String),
        (status = 403, description = "Caller may not act for this subject", body = ErrorResponse),
        (status = 404, description = "No code issued yet", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/verifications/{subject_kind}/{subject_id}/{target_kind}/{target_id}/qr")]
pub async fn get_verification_qr_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<PairRequest>,
) -> impl Responder {
    let query = IssueVerificationCommand::new(
        Actor::new(user.user_id, user.role),
        path.subject(),
        path.target(),
    );

    let record = match data.verification.get_current.execute(query).await {
        Ok(record) => record,
        Err(err) => return map_get_current_error(err),
    };

    match data.verification_presenter.qr_svg(&record.token) {
        Ok(svg) => HttpResponse::Ok().content_type("image/svg+xml").body(svg),
        Err(e) => {
            error!(record = %record.id, error = %e, "QR encoding failed");
            ApiResponse::internal_error()
        }
    }
}
