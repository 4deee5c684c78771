use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::domain::entities::{CloseReason, VerificationRecord};

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerificationRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("A current verification record already exists for this pair")]
    CurrentRecordExists,

    #[error("Verification record not found")]
    RecordNotFound,

    #[error("Corrupt verification record: {0}")]
    CorruptRecord(String),
}

/// Result of a conditional (`status = 'active'`) state change.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// This caller's transition was applied; carries the resulting record.
    Applied(VerificationRecord),
    /// Someone else moved the record first; carries the record as it is now.
    Lost(VerificationRecord),
}

/// Write side of the verification store. Every state change is a
/// compare-and-swap on `status = 'active'`.
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Fails with `CurrentRecordExists` if the pair already has a current record.
    async fn insert(
        &self,
        record: VerificationRecord,
    ) -> Result<VerificationRecord, VerificationRepositoryError>;

    async fn mark_verified(
        &self,
        record_id: Uuid,
        verified_by: UserId,
        verified_at: DateTime<Utc>,
    ) -> Result<TransitionOutcome, VerificationRepositoryError>;

    async fn close(
        &self,
        record_id: Uuid,
        reason: CloseReason,
    ) -> Result<TransitionOutcome, VerificationRepositoryError>;

    /// Expire `current_id` and insert `replacement` atomically.
    /// `Applied` carries the replacement, `Lost` the unchanged current record.
    async fn replace(
        &self,
        current_id: Uuid,
        replacement: VerificationRecord,
    ) -> Result<TransitionOutcome, VerificationRepositoryError>;
}
