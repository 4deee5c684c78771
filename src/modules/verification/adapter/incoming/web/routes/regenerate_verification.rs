use actix_web::{post, web, HttpResponse, Responder};
use tracing::{error, warn};

use crate::{
    api::schemas::{ErrorResponse, SuccessResponse},
    auth::{
        adapter::incoming::web::extractors::AuthenticatedUser,
        application::domain::entities::Actor,
    },
    shared::api::ApiResponse,
    verification::{
        adapter::incoming::web::dto::{receipt_details, PairRequest, VerificationCodeResponse},
        application::ports::incoming::use_cases::{
            IssueVerificationCommand, RegenerateVerificationError,
        },
    },
    AppState,
};

/// Regenerate a check-in code
///
/// Expires the current code and issues a new one. A code that has already
/// been used cannot be regenerated.
#[utoipa::path(
    post,
    path = "/api/verifications/regenerate",
    tag = "verifications",
    request_body = PairRequest,
    responses(
        (status = 201, description = "New code issued", body = inline(SuccessResponse<VerificationCodeResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller may not act for this subject", body = ErrorResponse),
        (status = 409, description = "Subject already checked in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/verifications/regenerate")]
pub async fn regenerate_verification_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<PairRequest>,
) -> impl Responder {
    let command = IssueVerificationCommand::new(
        Actor::new(user.user_id, user.role),
        payload.subject(),
        payload.target(),
    );

    match data.verification.regenerate.execute(command).await {
        Ok(record) => ApiResponse::created(VerificationCodeResponse::new(
            &record,
            &data.verification_presenter,
        )),
        Err(err) => map_regenerate_error(err, &payload),
    }
}

fn map_regenerate_error(err: RegenerateVerificationError, req: &PairRequest) -> HttpResponse {
    match err {
        RegenerateVerificationError::Forbidden => {
            warn!(subject = %req.subject(), "Regenerate refused for non-member");
            ApiResponse::forbidden("FORBIDDEN", "You may not act for this subject")
        }
        RegenerateVerificationError::AlreadyVerified(receipt) => ApiResponse::error_with_details(
            actix_web::http::StatusCode::CONFLICT,
            "ALREADY_VERIFIED",
            "This code has already been used and cannot be regenerated",
            Some(receipt_details(&receipt)),
        ),
        RegenerateVerificationError::RepositoryError(msg) => {
            error!(subject = %req.subject(), target = %req.target(), error = %msg, "Regenerate failed");
            ApiResponse::internal_error()
        }
    }
}
