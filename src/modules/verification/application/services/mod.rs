mod access;
mod get_current_verification_service;
mod invalidate_verification_service;
mod issuance;
mod issue_verification_service;
mod preview_verification_service;
mod regenerate_verification_service;
mod verify_token_service;

pub use get_current_verification_service::GetCurrentVerificationService;
pub use invalidate_verification_service::InvalidateVerificationService;
pub use issue_verification_service::IssueVerificationService;
pub use preview_verification_service::PreviewVerificationService;
pub use regenerate_verification_service::RegenerateVerificationService;
pub use verify_token_service::VerifyTokenService;
