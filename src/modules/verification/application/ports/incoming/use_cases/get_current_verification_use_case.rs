use async_trait::async_trait;

use crate::verification::application::domain::entities::VerificationRecord;
use crate::verification::application::ports::incoming::use_cases::IssueVerificationCommand;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetCurrentVerificationError {
    #[error("Caller may not act for this subject")]
    Forbidden,

    #[error("No current verification for this pair")]
    NotFound,

    #[error("Failed to fetch verification: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetCurrentVerificationUseCase: Send + Sync {
    async fn execute(
        &self,
        query: IssueVerificationCommand,
    ) -> Result<VerificationRecord, GetCurrentVerificationError>;
}
