use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::verification::application::{
    domain::entities::VerificationRecord,
    ports::{
        incoming::use_cases::{
            IssueVerificationCommand, RegenerateVerificationError, RegenerateVerificationUseCase,
        },
        outgoing::{
            RegistrationLookup, TokenGenerator, TransitionOutcome, VerificationQuery,
            VerificationRepository,
        },
    },
};

use super::{access::may_act_for, issuance::insert_or_adopt};

/// Attempts before giving up on a pair that keeps changing underneath us.
const MAX_ATTEMPTS: usize = 3;

pub struct RegenerateVerificationService<Q, R, L, G>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
    L: RegistrationLookup + Send + Sync,
    G: TokenGenerator + Send + Sync,
{
    query: Q,
    repository: R,
    lookup: L,
    tokens: G,
}

impl<Q, R, L, G> RegenerateVerificationService<Q, R, L, G>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
    L: RegistrationLookup + Send + Sync,
    G: TokenGenerator + Send + Sync,
{
    pub fn new(query: Q, repository: R, lookup: L, tokens: G) -> Self {
        Self {
            query,
            repository,
            lookup,
            tokens,
        }
    }

    fn repository_error(e: impl ToString) -> RegenerateVerificationError {
        RegenerateVerificationError::RepositoryError(e.to_string())
    }
}

#[async_trait]
impl<Q, R, L, G> RegenerateVerificationUseCase for RegenerateVerificationService<Q, R, L, G>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
    L: RegistrationLookup + Send + Sync,
    G: TokenGenerator + Send + Sync,
{
    async fn execute(
        &self,
        command: IssueVerificationCommand,
    ) -> Result<VerificationRecord, RegenerateVerificationError> {
        let subject = *command.subject();
        let target = *command.target();

        let allowed = may_act_for(&self.lookup, command.actor(), &subject)
            .await
            .map_err(Self::repository_error)?;
        if !allowed {
            warn!(
                "User {} tried to regenerate a code for {}",
                command.actor().user_id,
                subject
            );
            return Err(RegenerateVerificationError::Forbidden);
        }

        for _ in 0..MAX_ATTEMPTS {
            let current = self
                .query
                .find_current(&subject, &target)
                .await
                .map_err(Self::repository_error)?;

            let fresh =
                VerificationRecord::issue(subject, target, self.tokens.generate(), Utc::now());

            let current = match current {
                None => {
                    let (record, _) = insert_or_adopt(&self.query, &self.repository, fresh)
                        .await
                        .map_err(Self::repository_error)?;
                    return match record.receipt() {
                        Some(receipt) => Err(RegenerateVerificationError::AlreadyVerified(receipt)),
                        None => Ok(record),
                    };
                }
                Some(current) => current,
            };

            if let Some(receipt) = current.receipt() {
                warn!(
                    "Refusing to regenerate verified code {} for {} -> {}",
                    current.id, subject, target
                );
                return Err(RegenerateVerificationError::AlreadyVerified(receipt));
            }

            match self
                .repository
                .replace(current.id, fresh)
                .await
                .map_err(Self::repository_error)?
            {
                TransitionOutcome::Applied(record) => {
                    info!(
                        "Regenerated code for {} -> {}: {} expired, {} issued (token {})",
                        subject, target, current.id, record.id, record.token
                    );
                    return Ok(record);
                }
                TransitionOutcome::Lost(now) => {
                    if let Some(receipt) = now.receipt() {
                        return Err(RegenerateVerificationError::AlreadyVerified(receipt));
                    }
                    // Expired or rejected by a concurrent caller; look again.
                    warn!(
                        "Code {} changed to {} during regeneration, retrying",
                        now.id,
                        now.status.as_str()
                    );
                }
            }
        }

        error!(
            "Gave up regenerating code for {} -> {} after {} attempts",
            subject, target, MAX_ATTEMPTS
        );
        Err(Self::repository_error(
            "verification record kept changing during regeneration",
        ))
    }
}
