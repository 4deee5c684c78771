use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::{
    domain::entities::{
        CloseReason, SubjectRef, TargetRef, VerificationRecord, VerificationToken,
    },
    ports::outgoing::{
        TransitionOutcome, VerificationQuery, VerificationQueryError, VerificationRepository,
        VerificationRepositoryError,
    },
};

/// Behaves like the Postgres schema: unique tokens, one current record per
/// pair, conditional transitions on `active`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVerificationStore {
    records: Arc<Mutex<Vec<VerificationRecord>>>,
}

impl InMemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<VerificationRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn all(&self) -> Vec<VerificationRecord> {
        self.lock().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<VerificationRecord> {
        self.lock().iter().find(|r| r.id == id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<VerificationRecord>> {
        self.records.lock().expect("store mutex poisoned")
    }

    fn check_unique(
        records: &[VerificationRecord],
        candidate: &VerificationRecord,
    ) -> Result<(), VerificationRepositoryError> {
        if records.iter().any(|r| r.token == candidate.token) {
            return Err(VerificationRepositoryError::DatabaseError(
                "duplicate token".to_string(),
            ));
        }
        if records.iter().any(|r| {
            r.subject == candidate.subject && r.target == candidate.target && r.status.is_current()
        }) {
            return Err(VerificationRepositoryError::CurrentRecordExists);
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationQuery for InMemoryVerificationStore {
    async fn find_by_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<VerificationRecord>, VerificationQueryError> {
        Ok(self.lock().iter().find(|r| &r.token == token).cloned())
    }

    async fn find_current(
        &self,
        subject: &SubjectRef,
        target: &TargetRef,
    ) -> Result<Option<VerificationRecord>, VerificationQueryError> {
        Ok(self
            .lock()
            .iter()
            .find(|r| &r.subject == subject && &r.target == target && r.status.is_current())
            .cloned())
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationStore {
    async fn insert(
        &self,
        record: VerificationRecord,
    ) -> Result<VerificationRecord, VerificationRepositoryError> {
        let mut records = self.lock();
        Self::check_unique(&records, &record)?;
        records.push(record.clone());
        Ok(record)
    }

    async fn mark_verified(
        &self,
        record_id: Uuid,
        verified_by: UserId,
        verified_at: DateTime<Utc>,
    ) -> Result<TransitionOutcome, VerificationRepositoryError> {
        let mut records = self.lock();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or(VerificationRepositoryError::RecordNotFound)?;

        match record.mark_verified(verified_by, verified_at) {
            Ok(_) => Ok(TransitionOutcome::Applied(record.clone())),
            Err(_) => Ok(TransitionOutcome::Lost(record.clone())),
        }
    }

    async fn close(
        &self,
        record_id: Uuid,
        reason: CloseReason,
    ) -> Result<TransitionOutcome, VerificationRepositoryError> {
        let mut records = self.lock();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or(VerificationRepositoryError::RecordNotFound)?;

        match record.close(reason) {
            Ok(()) => Ok(TransitionOutcome::Applied(record.clone())),
            Err(_) => Ok(TransitionOutcome::Lost(record.clone())),
        }
    }

    async fn replace(
        &self,
        current_id: Uuid,
        replacement: VerificationRecord,
    ) -> Result<TransitionOutcome, VerificationRepositoryError> {
        let mut records = self.lock();
        let index = records
            .iter()
            .position(|r| r.id == current_id)
            .ok_or(VerificationRepositoryError::RecordNotFound)?;

        let mut current = records[index].clone();
        if current.close(CloseReason::Regenerated).is_err() {
            return Ok(TransitionOutcome::Lost(current));
        }

        // Both steps or neither.
        let mut staged = records.clone();
        staged[index] = current;
        Self::check_unique(&staged, &replacement)?;
        staged.push(replacement.clone());
        *records = staged;

        Ok(TransitionOutcome::Applied(replacement))
    }
}
