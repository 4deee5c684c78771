use async_trait::async_trait;

use crate::verification::application::domain::entities::{
    SubjectRef, TargetRef, VerificationRecord, VerificationToken,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerificationQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt verification record: {0}")]
    CorruptRecord(String),
}

#[async_trait]
pub trait VerificationQuery: Send + Sync {
    async fn find_by_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<VerificationRecord>, VerificationQueryError>;

    /// The pair's `active` or `verified` record, if any.
    async fn find_current(
        &self,
        subject: &SubjectRef,
        target: &TargetRef,
    ) -> Result<Option<VerificationRecord>, VerificationQueryError>;
}
