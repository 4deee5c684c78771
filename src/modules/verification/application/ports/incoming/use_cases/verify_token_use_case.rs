use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::domain::{
    entities::{
        CheckInReceipt, SubjectRef, TargetRef, VerificationRecord, VerificationStatus,
        VerificationToken,
    },
    registration::RegistrationSnapshot,
};

/// Human-readable names shown to the scanning staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNames {
    pub subject_name: String,
    pub target_name: String,
}

impl DisplayNames {
    /// Registration names when the platform has them, `kind #id` otherwise.
    pub fn resolve(
        subject: &SubjectRef,
        target: &TargetRef,
        snapshot: Option<&RegistrationSnapshot>,
    ) -> Self {
        match snapshot {
            Some(registration) => Self {
                subject_name: registration.subject_name.clone(),
                target_name: registration.target_name.clone(),
            },
            None => Self {
                subject_name: format!("{} #{}", subject.kind.as_str(), subject.id),
                target_name: format!("{} #{}", target.kind.as_str(), target.id),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationSuccess {
    pub record: VerificationRecord,
    pub receipt: CheckInReceipt,
    pub names: DisplayNames,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyTokenError {
    #[error("Invalid QR code")]
    NotFound,

    #[error("QR code has already been used")]
    AlreadyUsed(CheckInReceipt),

    #[error("QR code is {}", .0.as_str())]
    InvalidState(VerificationStatus),

    #[error("Subject is not eligible: {0}")]
    Ineligible(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

pub type VerificationResult = Result<VerificationSuccess, VerifyTokenError>;

/// Single-use: of any number of concurrent calls for one token, at most one
/// returns `Ok`.
#[async_trait]
pub trait VerifyTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        token: VerificationToken,
        verifying_identity: UserId,
    ) -> VerificationResult;
}
