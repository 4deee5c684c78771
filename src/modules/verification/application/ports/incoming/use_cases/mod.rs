mod get_current_verification_use_case;
mod invalidate_verification_use_case;
mod issue_verification_use_case;
mod preview_verification_use_case;
mod regenerate_verification_use_case;
mod verify_token_use_case;

pub use get_current_verification_use_case::{
    GetCurrentVerificationError, GetCurrentVerificationUseCase,
};
pub use invalidate_verification_use_case::{
    InvalidateVerificationError, InvalidateVerificationUseCase,
};
pub use issue_verification_use_case::{
    IssueVerificationCommand, IssueVerificationError, IssueVerificationUseCase, IssuedVerification,
};
pub use preview_verification_use_case::{
    PreviewVerificationError, PreviewVerificationUseCase, VerificationPreview,
};
pub use regenerate_verification_use_case::{
    RegenerateVerificationError, RegenerateVerificationUseCase,
};
pub use verify_token_use_case::{
    DisplayNames, VerificationResult, VerificationSuccess, VerifyTokenError, VerifyTokenUseCase,
};
