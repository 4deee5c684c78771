use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::{
    domain::{
        entities::{TransitionRejection, VerificationRecord, VerificationToken},
        policies::{evaluate_eligibility, Eligibility},
    },
    ports::{
        incoming::use_cases::{
            DisplayNames, VerificationResult, VerificationSuccess, VerifyTokenError,
            VerifyTokenUseCase,
        },
        outgoing::{RegistrationLookup, TransitionOutcome, VerificationQuery, VerificationRepository},
    },
};

pub struct VerifyTokenService<Q, R, L>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
    L: RegistrationLookup + Send + Sync,
{
    query: Q,
    repository: R,
    lookup: L,
}

impl<Q, R, L> VerifyTokenService<Q, R, L>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
    L: RegistrationLookup + Send + Sync,
{
    pub fn new(query: Q, repository: R, lookup: L) -> Self {
        Self {
            query,
            repository,
            lookup,
        }
    }
}

fn rejection_error(record: &VerificationRecord, rejection: TransitionRejection) -> VerifyTokenError {
    match rejection {
        TransitionRejection::AlreadyUsed(receipt) => {
            warn!(
                "Replay of code {} (token {}), already verified by {} at {}",
                record.id, record.token, receipt.verified_by, receipt.verified_at
            );
            VerifyTokenError::AlreadyUsed(receipt)
        }
        TransitionRejection::InvalidState(status) => {
            warn!(
                "Code {} (token {}) is {}",
                record.id,
                record.token,
                status.as_str()
            );
            VerifyTokenError::InvalidState(status)
        }
    }
}

#[async_trait]
impl<Q, R, L> VerifyTokenUseCase for VerifyTokenService<Q, R, L>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
    L: RegistrationLookup + Send + Sync,
{
    async fn execute(
        &self,
        token: VerificationToken,
        verifying_identity: UserId,
    ) -> VerificationResult {
        // 1. Lookup
        let record = self
            .query
            .find_by_token(&token)
            .await
            .map_err(|e| {
                error!("Token lookup failed for {}: {}", token, e);
                VerifyTokenError::RepositoryError(e.to_string())
            })?
            .ok_or_else(|| {
                warn!("Unknown verification token {}", token);
                VerifyTokenError::NotFound
            })?;

        // 2. State
        record
            .ensure_verifiable()
            .map_err(|rejection| rejection_error(&record, rejection))?;

        // 3. Eligibility
        let snapshot = self
            .lookup
            .find_registration(&record.subject, &record.target)
            .await
            .map_err(|e| {
                error!("Registration lookup failed for {}: {}", record.subject, e);
                VerifyTokenError::RepositoryError(e.to_string())
            })?;

        if let Eligibility::Ineligible(reason) =
            evaluate_eligibility(&record.target, snapshot.as_ref())
        {
            warn!(
                "Code {} for {} -> {} not honored: {}",
                record.id, record.subject, record.target, reason
            );
            return Err(VerifyTokenError::Ineligible(reason));
        }

        let names = DisplayNames::resolve(&record.subject, &record.target, snapshot.as_ref());

        // 4. Conditional transition
        let outcome = self
            .repository
            .mark_verified(record.id, verifying_identity, Utc::now())
            .await
            .map_err(|e| {
                error!("Failed to mark code {} verified: {}", record.id, e);
                VerifyTokenError::RepositoryError(e.to_string())
            })?;

        match outcome {
            TransitionOutcome::Applied(updated) => {
                let receipt = updated.receipt().ok_or_else(|| {
                    VerifyTokenError::RepositoryError(format!(
                        "record {} verified without audit fields",
                        updated.id
                    ))
                })?;
                info!(
                    "Checked in {} -> {} (code {}, token {}) by {}",
                    updated.subject, updated.target, updated.id, updated.token, verifying_identity
                );
                Ok(VerificationSuccess {
                    record: updated,
                    receipt,
                    names,
                })
            }
            TransitionOutcome::Lost(current) => match current.ensure_verifiable() {
                Err(rejection) => Err(rejection_error(&current, rejection)),
                Ok(()) => Err(VerifyTokenError::RepositoryError(format!(
                    "conditional update on {} matched nothing while still active",
                    current.id
                ))),
            },
        }
    }
}
