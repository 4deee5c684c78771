use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::{
    domain::entities::{CloseReason, TransitionRejection, VerificationRecord, VerificationToken},
    ports::{
        incoming::use_cases::{InvalidateVerificationError, InvalidateVerificationUseCase},
        outgoing::{TransitionOutcome, VerificationQuery, VerificationRepository},
    },
};

pub struct InvalidateVerificationService<Q, R>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
{
    query: Q,
    repository: R,
}

impl<Q, R> InvalidateVerificationService<Q, R>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

impl From<TransitionRejection> for InvalidateVerificationError {
    fn from(rejection: TransitionRejection) -> Self {
        match rejection {
            TransitionRejection::AlreadyUsed(receipt) => Self::AlreadyUsed(receipt),
            TransitionRejection::InvalidState(status) => Self::InvalidState(status),
        }
    }
}

#[async_trait]
impl<Q, R> InvalidateVerificationUseCase for InvalidateVerificationService<Q, R>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
{
    async fn execute(
        &self,
        token: VerificationToken,
        rejected_by: UserId,
    ) -> Result<VerificationRecord, InvalidateVerificationError> {
        let record = self
            .query
            .find_by_token(&token)
            .await
            .map_err(|e| InvalidateVerificationError::RepositoryError(e.to_string()))?
            .ok_or_else(|| {
                warn!("Rejection of unknown token {}", token);
                InvalidateVerificationError::NotFound
            })?;

        record.ensure_verifiable()?;

        let outcome = self
            .repository
            .close(record.id, CloseReason::RejectedByStaff)
            .await
            .map_err(|e| {
                error!("Failed to reject code {}: {}", record.id, e);
                InvalidateVerificationError::RepositoryError(e.to_string())
            })?;

        match outcome {
            TransitionOutcome::Applied(closed) => {
                info!(
                    "Code {} for {} -> {} rejected by {}",
                    closed.id, closed.subject, closed.target, rejected_by
                );
                Ok(closed)
            }
            TransitionOutcome::Lost(current) => {
                current.ensure_verifiable()?;
                Err(InvalidateVerificationError::RepositoryError(format!(
                    "conditional update on {} matched nothing while still active",
                    current.id
                )))
            }
        }
    }
}
