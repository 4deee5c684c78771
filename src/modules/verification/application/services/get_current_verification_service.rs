use async_trait::async_trait;
use tracing::warn;

use crate::verification::application::{
    domain::entities::VerificationRecord,
    ports::{
        incoming::use_cases::{
            GetCurrentVerificationError, GetCurrentVerificationUseCase, IssueVerificationCommand,
        },
        outgoing::{RegistrationLookup, VerificationQuery},
    },
};

use super::access::may_act_for;

pub struct GetCurrentVerificationService<Q, L>
where
    Q: VerificationQuery + Send + Sync,
    L: RegistrationLookup + Send + Sync,
{
    query: Q,
    lookup: L,
}

impl<Q, L> GetCurrentVerificationService<Q, L>
where
    Q: VerificationQuery + Send + Sync,
    L: RegistrationLookup + Send + Sync,
{
    pub fn new(query: Q, lookup: L) -> Self {
        Self { query, lookup }
    }
}

#[async_trait]
impl<Q, L> GetCurrentVerificationUseCase for GetCurrentVerificationService<Q, L>
where
    Q: VerificationQuery + Send + Sync,
    L: RegistrationLookup + Send + Sync,
{
    async fn execute(
        &self,
        query: IssueVerificationCommand,
    ) -> Result<VerificationRecord, GetCurrentVerificationError> {
        let allowed = may_act_for(&self.lookup, query.actor(), query.subject())
            .await
            .map_err(|e| GetCurrentVerificationError::QueryFailed(e.to_string()))?;
        if !allowed {
            warn!(
                "User {} tried to read the code of {}",
                query.actor().user_id,
                query.subject()
            );
            return Err(GetCurrentVerificationError::Forbidden);
        }

        self.query
            .find_current(query.subject(), query.target())
            .await
            .map_err(|e| GetCurrentVerificationError::QueryFailed(e.to_string()))?
            .ok_or(GetCurrentVerificationError::NotFound)
    }
}
