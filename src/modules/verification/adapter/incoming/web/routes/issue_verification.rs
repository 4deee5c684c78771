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
        adapter::incoming::web::dto::{PairRequest, VerificationCodeResponse},
        application::ports::incoming::use_cases::{
            IssueVerificationCommand, IssueVerificationError,
        },
    },
    AppState,
};

/// Issue a check-in code
///
/// Returns the pair's current code if one exists (200), otherwise issues a
/// fresh one (201).
#[utoipa::path(
    post,
    path = "/api/verifications",
    tag = "verifications",
    request_body = PairRequest,
    responses(
        (status = 201, description = "Code issued", body = inline(SuccessResponse<VerificationCodeResponse>)),
        (status = 200, description = "Existing code returned", body = inline(SuccessResponse<VerificationCodeResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller may not act for this subject", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/verifications")]
pub async fn issue_verification_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<PairRequest>,
) -> impl Responder {
    let command = IssueVerificationCommand::new(
        Actor::new(user.user_id, user.role),
        payload.subject(),
        payload.target(),
    );

    match data.verification.issue.execute(command).await {
        Ok(issued) => {
            let body = VerificationCodeResponse::new(&issued.record, &data.verification_presenter);
            if issued.newly_issued {
                ApiResponse::created(body)
            } else {
                ApiResponse::success(body)
            }
        }
        Err(err) => map_issue_error(err, &payload),
    }
}

fn map_issue_error(err: IssueVerificationError, req: &PairRequest) -> HttpResponse {
    match err {
        IssueVerificationError::Forbidden => {
            warn!(subject = %req.subject(), "Issue refused for non-member");
            ApiResponse::forbidden("FORBIDDEN", "You may not act for this subject")
        }
        IssueVerificationError::RepositoryError(msg) => {
            error!(subject = %req.subject(), target = %req.target(), error = %msg, "Issue failed");
            ApiResponse::internal_error()
        }
    }
}
