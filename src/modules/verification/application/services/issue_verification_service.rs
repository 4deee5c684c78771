use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, warn};

use crate::verification::application::{
    domain::entities::VerificationRecord,
    ports::{
        incoming::use_cases::{
            IssueVerificationCommand, IssueVerificationError, IssueVerificationUseCase,
            IssuedVerification,
        },
        outgoing::{RegistrationLookup, TokenGenerator, VerificationQuery, VerificationRepository},
    },
};

use super::{access::may_act_for, issuance::insert_or_adopt};

pub struct IssueVerificationService<Q, R, L, G>
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

impl<Q, R, L, G> IssueVerificationService<Q, R, L, G>
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
}

#[async_trait]
impl<Q, R, L, G> IssueVerificationUseCase for IssueVerificationService<Q, R, L, G>
where
    Q: VerificationQuery + Send + Sync,
    R: VerificationRepository + Send + Sync,
    L: RegistrationLookup + Send + Sync,
    G: TokenGenerator + Send + Sync,
{
    async fn execute(
        &self,
        command: IssueVerificationCommand,
    ) -> Result<IssuedVerification, IssueVerificationError> {
        let subject = command.subject();
        let target = command.target();

        let allowed = may_act_for(&self.lookup, command.actor(), subject)
            .await
            .map_err(|e| IssueVerificationError::RepositoryError(e.to_string()))?;
        if !allowed {
            warn!(
                "User {} tried to issue a code for {}",
                command.actor().user_id,
                subject
            );
            return Err(IssueVerificationError::Forbidden);
        }

        let current = self
            .query
            .find_current(subject, target)
            .await
            .map_err(|e| IssueVerificationError::RepositoryError(e.to_string()))?;

        if let Some(record) = current {
            return Ok(IssuedVerification {
                record,
                newly_issued: false,
            });
        }

        let fresh = VerificationRecord::issue(*subject, *target, self.tokens.generate(), Utc::now());

        let (record, newly_issued) = insert_or_adopt(&self.query, &self.repository, fresh)
            .await
            .map_err(|e| {
                error!("Failed to issue code for {} -> {}: {}", subject, target, e);
                IssueVerificationError::RepositoryError(e)
            })?;

        Ok(IssuedVerification {
            record,
            newly_issued,
        })
    }
}
