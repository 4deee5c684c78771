use async_trait::async_trait;

use crate::verification::application::domain::entities::{VerificationRecord, VerificationToken};
use crate::verification::application::domain::policies::Eligibility;
use crate::verification::application::ports::incoming::use_cases::DisplayNames;

/// What the scanner shows before staff commit the check-in. Never mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationPreview {
    pub record: VerificationRecord,
    pub names: DisplayNames,
    pub eligibility: Eligibility,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PreviewVerificationError {
    #[error("Invalid QR code")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait PreviewVerificationUseCase: Send + Sync {
    async fn execute(
        &self,
        token: VerificationToken,
    ) -> Result<VerificationPreview, PreviewVerificationError>;
}
