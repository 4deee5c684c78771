use actix_web::{get, web, HttpResponse, Responder};
use tracing::error;

use crate::{
    api::schemas::{ErrorResponse, SuccessResponse},
    auth::{
        adapter::incoming::web::extractors::AuthenticatedUser,
        application::domain::entities::Actor,
    },
    shared::api::ApiResponse,
    verification::{
        adapter::incoming::web::dto::{PairRequest, VerificationCodeResponse},
        application::ports::incoming::use_cases::{
            GetCurrentVerificationError, IssueVerificationCommand,
        },
    },
    AppState,
};

/// Current check-in code and status for a pair
#[utoipa::path(
    get,
    path = "/api/verifications/{subject_kind}/{subject_id}/{target_kind}/{target_id}",
    tag = "verifications",
    params(PairRequest),
    responses(
        (status = 200, description = "Current code", body = inline(SuccessResponse<VerificationCodeResponse>)),
        (status = 403, description = "Caller may not act for this subject", body = ErrorResponse),
        (status = 404, description = "No code issued yet", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/verifications/{subject_kind}/{subject_id}/{target_kind}/{target_id}")]
pub async fn get_current_verification_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<PairRequest>,
) -> impl Responder {
    let query = IssueVerificationCommand::new(
        Actor::new(user.user_id, user.role),
        path.subject(),
        path.target(),
    );

    match data.verification.get_current.execute(query).await {
        Ok(record) => ApiResponse::success(VerificationCodeResponse::new(
            &record,
            &data.verification_presenter,
        )),
        Err(err) => map_get_current_error(err),
    }
}

pub(super) fn map_get_current_error(err: GetCurrentVerificationError) -> HttpResponse {
    match err {
        GetCurrentVerificationError::Forbidden => {
            ApiResponse::forbidden("FORBIDDEN", "You may not act for this subject")
        }
        GetCurrentVerificationError::NotFound => {
            ApiResponse::not_found("VERIFICATION_NOT_FOUND", "No code has been issued yet")
        }
        GetCurrentVerificationError::QueryFailed(msg) => {
            error!("Failed to fetch current verification: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
