use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::application::domain::entities::UserId;
use crate::verification::adapter::incoming::web::dto::{
    CheckInResponse, PairRequest, PreviewResponse, VerificationCodeResponse,
};
use crate::verification::application::domain::entities::{
    SubjectKind, SubjectRef, TargetKind, TargetRef, VerificationStatus,
};
use crate::verification::application::presenter::{StatusLabel, VerificationView};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Check-in Verification API",
        version = "1.0.0",
        description = "QR-code check-in for event registrations, sub-events and activities",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Subject endpoints
        crate::verification::adapter::incoming::web::routes::issue_verification_handler,
        crate::verification::adapter::incoming::web::routes::regenerate_verification_handler,
        crate::verification::adapter::incoming::web::routes::get_current_verification_handler,
        crate::verification::adapter::incoming::web::routes::get_verification_qr_handler,

        // Check-in desk endpoints
        crate::verification::adapter::incoming::web::routes::preview_verification_handler,
        crate::verification::adapter::incoming::web::routes::verify_token_handler,
        crate::verification::adapter::incoming::web::routes::reject_verification_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<VerificationCodeResponse>,
            ErrorResponse,
            ErrorDetail,

            // Verification DTOs
            PairRequest,
            VerificationCodeResponse,
            CheckInResponse,
            PreviewResponse,
            VerificationView,
            StatusLabel,
            VerificationStatus,
            SubjectKind,
            SubjectRef,
            TargetKind,
            TargetRef,
            UserId
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "verifications", description = "Issuing and displaying check-in codes"),
        (name = "check-in", description = "Scanning codes at the check-in desk"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token issued by the event platform"))
                        .build(),
                ),
            )
        }
    }
}
