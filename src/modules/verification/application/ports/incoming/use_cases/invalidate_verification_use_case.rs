use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::domain::entities::{
    CheckInReceipt, VerificationRecord, VerificationStatus, VerificationToken,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidateVerificationError {
    #[error("Invalid QR code")]
    NotFound,

    #[error("QR code has already been used")]
    AlreadyUsed(CheckInReceipt),

    #[error("QR code is {}", .0.as_str())]
    InvalidState(VerificationStatus),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Staff rejects an active code at the desk (`active -> rejected`).
#[async_trait]
pub trait InvalidateVerificationUseCase: Send + Sync {
    async fn execute(
        &self,
        token: VerificationToken,
        rejected_by: UserId,
    ) -> Result<VerificationRecord, InvalidateVerificationError>;
}
