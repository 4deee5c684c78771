use async_trait::async_trait;

use crate::verification::application::domain::entities::{CheckInReceipt, VerificationRecord};
use crate::verification::application::ports::incoming::use_cases::IssueVerificationCommand;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RegenerateVerificationError {
    #[error("Caller may not act for this subject")]
    Forbidden,

    #[error("Subject has already been checked in")]
    AlreadyVerified(CheckInReceipt),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Expires the current active token and issues a fresh one.
#[async_trait]
pub trait RegenerateVerificationUseCase: Send + Sync {
    async fn execute(
        &self,
        command: IssueVerificationCommand,
    ) -> Result<VerificationRecord, RegenerateVerificationError>;
}
