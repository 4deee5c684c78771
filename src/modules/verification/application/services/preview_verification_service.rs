use async_trait::async_trait;
use tracing::{error, warn};

use crate::verification::application::{
    domain::{
        entities::VerificationToken,
        policies::{evaluate_eligibility, Eligibility},
    },
    ports::{
        incoming::use_cases::{
            DisplayNames, PreviewVerificationError, PreviewVerificationUseCase,
            VerificationPreview,
        },
        outgoing::{RegistrationLookup, VerificationQuery},
    },
};

pub struct PreviewVerificationService<Q, L>
where
    Q: VerificationQuery + Send + Sync,
    L: RegistrationLookup + Send + Sync,
{
    query: Q,
    lookup: L,
}

impl<Q, L> PreviewVerificationService<Q, L>
where
    Q: VerificationQuery + Send + Sync,
    L: RegistrationLookup + Send + Sync,
{
    pub fn new(query: Q, lookup: L) -> Self {
        Self { query, lookup }
    }
}

#[async_trait]
impl<Q, L> PreviewVerificationUseCase for PreviewVerificationService<Q, L>
where
    Q: VerificationQuery + Send + Sync,
    L: RegistrationLookup + Send + Sync,
{
    async fn execute(
        &self,
        token: VerificationToken,
    ) -> Result<VerificationPreview, PreviewVerificationError> {
        let record = self
            .query
            .find_by_token(&token)
            .await
            .map_err(|e| {
                error!("Token lookup failed for {}: {}", token, e);
                PreviewVerificationError::RepositoryError(e.to_string())
            })?
            .ok_or_else(|| {
                warn!("Preview of unknown token {}", token);
                PreviewVerificationError::NotFound
            })?;

        let snapshot = self
            .lookup
            .find_registration(&record.subject, &record.target)
            .await
            .map_err(|e| PreviewVerificationError::RepositoryError(e.to_string()))?;

        // Only an active code can still be honored.
        let eligibility = if record.is_active() {
            evaluate_eligibility(&record.target, snapshot.as_ref())
        } else {
            Eligibility::Eligible
        };

        let names = DisplayNames::resolve(&record.subject, &record.target, snapshot.as_ref());

        Ok(VerificationPreview {
            record,
            names,
            eligibility,
        })
    }
}
