use tracing::{info, warn};

use crate::verification::application::{
    domain::entities::VerificationRecord,
    ports::outgoing::{
        VerificationQuery, VerificationRepository, VerificationRepositoryError,
    },
};

/// Insert a fresh record. If a concurrent issuer won the pair's unique
/// index, adopt the winner's record instead. The flag is `true` only when
/// `fresh` itself was stored.
pub(super) async fn insert_or_adopt<Q, R>(
    query: &Q,
    repository: &R,
    fresh: VerificationRecord,
) -> Result<(VerificationRecord, bool), String>
where
    Q: VerificationQuery + ?Sized,
    R: VerificationRepository + ?Sized,
{
    let subject = fresh.subject;
    let target = fresh.target;

    match repository.insert(fresh).await {
        Ok(stored) => {
            info!(
                "Issued verification {} for {} -> {} (token {})",
                stored.id, stored.subject, stored.target, stored.token
            );
            Ok((stored, true))
        }
        Err(VerificationRepositoryError::CurrentRecordExists) => {
            warn!(
                "Concurrent issue for {} -> {}, adopting existing record",
                subject, target
            );
            match query.find_current(&subject, &target).await {
                Ok(Some(existing)) => Ok((existing, false)),
                Ok(None) => Err(format!(
                    "current record for {} -> {} disappeared after conflict",
                    subject, target
                )),
                Err(e) => Err(e.to_string()),
            }
        }
        Err(e) => Err(e.to_string()),
    }
}
