use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::{
    domain::entities::{CloseReason, VerificationRecord, VerificationStatus},
    ports::outgoing::{TransitionOutcome, VerificationRepository, VerificationRepositoryError},
};

use super::sea_orm_entity::verification_records::{Column, Entity, Model, CURRENT_PAIR_INDEX};

#[derive(Debug, Clone)]
pub struct VerificationRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl VerificationRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn insert_on<C: ConnectionTrait>(
        conn: &C,
        record: &VerificationRecord,
    ) -> Result<VerificationRecord, VerificationRepositoryError> {
        let inserted = Model::from_domain(record)
            .into_active_model()
            .reset_all()
            .insert(conn)
            .await
            .map_err(map_insert_err)?;

        inserted
            .to_domain()
            .map_err(VerificationRepositoryError::CorruptRecord)
    }

    async fn load<C: ConnectionTrait>(
        conn: &C,
        record_id: Uuid,
    ) -> Result<VerificationRecord, VerificationRepositoryError> {
        Entity::find_by_id(record_id)
            .one(conn)
            .await
            .map_err(map_db_err)?
            .ok_or(VerificationRepositoryError::RecordNotFound)?
            .to_domain()
            .map_err(VerificationRepositoryError::CorruptRecord)
    }

    /// `UPDATE … SET status = <reason> WHERE id = $1 AND status = 'active' RETURNING *`
    async fn close_on<C: ConnectionTrait>(
        conn: &C,
        record_id: Uuid,
        reason: CloseReason,
    ) -> Result<Option<Model>, DbErr> {
        let updated = Entity::update_many()
            .col_expr(Column::Status, Expr::value(reason.status().as_str()))
            .filter(Column::Id.eq(record_id))
            .filter(Column::Status.eq(VerificationStatus::Active.as_str()))
            .exec_with_returning(conn)
            .await?;

        Ok(updated.into_iter().next())
    }

    /// The row a conditional update returned, or the row that beat it.
    async fn settle<C: ConnectionTrait>(
        conn: &C,
        record_id: Uuid,
        updated: Option<Model>,
    ) -> Result<TransitionOutcome, VerificationRepositoryError> {
        match updated {
            Some(model) => model
                .to_domain()
                .map(TransitionOutcome::Applied)
                .map_err(VerificationRepositoryError::CorruptRecord),
            None => Self::load(conn, record_id).await.map(TransitionOutcome::Lost),
        }
    }
}

fn map_db_err(e: DbErr) -> VerificationRepositoryError {
    VerificationRepositoryError::DatabaseError(e.to_string())
}

fn map_insert_err(e: DbErr) -> VerificationRepositoryError {
    if e.to_string().contains(CURRENT_PAIR_INDEX) {
        return VerificationRepositoryError::CurrentRecordExists;
    }
    map_db_err(e)
}

#[async_trait]
impl VerificationRepository for VerificationRepositoryPostgres {
    async fn insert(
        &self,
        record: VerificationRecord,
    ) -> Result<VerificationRecord, VerificationRepositoryError> {
        Self::insert_on(&*self.db, &record).await
    }

    async fn mark_verified(
        &self,
        record_id: Uuid,
        verified_by: UserId,
        verified_at: DateTime<Utc>,
    ) -> Result<TransitionOutcome, VerificationRepositoryError> {
        let updated = Entity::update_many()
            .col_expr(
                Column::Status,
                Expr::value(VerificationStatus::Verified.as_str()),
            )
            .col_expr(Column::VerifiedAt, Expr::value(verified_at.fixed_offset()))
            .col_expr(Column::VerifiedBy, Expr::value(i64::from(verified_by)))
            .filter(Column::Id.eq(record_id))
            .filter(Column::Status.eq(VerificationStatus::Active.as_str())) // compare-and-swap
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        Self::settle(&*self.db, record_id, updated.into_iter().next()).await
    }

    async fn close(
        &self,
        record_id: Uuid,
        reason: CloseReason,
    ) -> Result<TransitionOutcome, VerificationRepositoryError> {
        let updated = Self::close_on(&*self.db, record_id, reason)
            .await
            .map_err(map_db_err)?;

        Self::settle(&*self.db, record_id, updated).await
    }

    async fn replace(
        &self,
        current_id: Uuid,
        replacement: VerificationRecord,
    ) -> Result<TransitionOutcome, VerificationRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let expired = match Self::close_on(&txn, current_id, CloseReason::Regenerated).await {
            Ok(expired) => expired,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(map_db_err(e));
            }
        };

        if expired.is_none() {
            let current = Self::load(&txn, current_id).await;
            let _ = txn.rollback().await;
            warn!("Regeneration lost the race on code {}", current_id);
            return current.map(TransitionOutcome::Lost);
        }

        let inserted = match Self::insert_on(&txn, &replacement).await {
            Ok(inserted) => inserted,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(e);
            }
        };

        txn.commit().await.map_err(map_db_err)?;

        Ok(TransitionOutcome::Applied(inserted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::verification::application::domain::entities::{
        SubjectKind, SubjectRef, TargetKind, TargetRef, VerificationToken,
    };

    /// An `UPDATE … RETURNING` that matched nothing.
    fn no_rows() -> Vec<Model> {
        Vec::new()
    }

    fn issued(token: &str) -> VerificationRecord {
        VerificationRecord::issue(
            SubjectRef::new(SubjectKind::Participant, 42),
            TargetRef::new(TargetKind::Event, 7),
            VerificationToken::from(token),
            Utc::now(),
        )
    }

    fn verified_model(record: &VerificationRecord, by: i64, at: DateTime<Utc>) -> Model {
        let mut verified = record.clone();
        verified.mark_verified(UserId::from(by), at).unwrap();
        Model::from_domain(&verified)
    }

    // =====================================================
    // insert
    // =====================================================

    #[tokio::test]
    async fn test_insert_success() {
        let record = issued("abc123");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![Model::from_domain(&record)]])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let stored = repo.insert(record.clone()).await.unwrap();

        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_insert_current_pair_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(format!(
                "duplicate key value violates unique constraint \"{}\"",
                CURRENT_PAIR_INDEX
            ))])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let result = repo.insert(issued("abc123")).await;

        assert!(matches!(
            result,
            Err(VerificationRepositoryError::CurrentRecordExists)
        ));
    }

    #[tokio::test]
    async fn test_insert_other_error_is_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let result = repo.insert(issued("abc123")).await;

        assert!(matches!(
            result,
            Err(VerificationRepositoryError::DatabaseError(_))
        ));
    }

    // =====================================================
    // mark_verified
    // =====================================================

    #[tokio::test]
    async fn test_mark_verified_applied() {
        let record = issued("abc123");
        let at = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![verified_model(&record, 1, at)]])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let outcome = repo
            .mark_verified(record.id, UserId::from(1), at)
            .await
            .unwrap();

        match outcome {
            TransitionOutcome::Applied(updated) => {
                assert_eq!(updated.status, VerificationStatus::Verified);
                assert_eq!(updated.verified_by(), Some(UserId::from(1)));
            }
            other => panic!("expected Applied, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mark_verified_applied_needs_no_second_read() {
        let record = issued("abc123");
        let at = Utc::now();
        // Any read after the update would fail; the committed check-in must
        // still be reported as applied.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![verified_model(&record, 1, at)]])
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let outcome = repo.mark_verified(record.id, UserId::from(1), at).await;

        assert!(matches!(
            outcome,
            Ok(TransitionOutcome::Applied(r)) if r.verified_by() == Some(UserId::from(1))
        ));
    }

    #[tokio::test]
    async fn test_mark_verified_lost_returns_winner() {
        let record = issued("abc123");
        let first_at = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![no_rows(), vec![verified_model(&record, 1, first_at)]])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let outcome = repo
            .mark_verified(record.id, UserId::from(2), Utc::now())
            .await
            .unwrap();

        match outcome {
            TransitionOutcome::Lost(current) => {
                assert_eq!(current.verified_by(), Some(UserId::from(1)));
            }
            other => panic!("expected Lost, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mark_verified_missing_record() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![no_rows(), no_rows()])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let result = repo
            .mark_verified(Uuid::new_v4(), UserId::from(1), Utc::now())
            .await;

        assert!(matches!(
            result,
            Err(VerificationRepositoryError::RecordNotFound)
        ));
    }

    #[tokio::test]
    async fn test_mark_verified_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("deadlock detected".to_string())])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let result = repo
            .mark_verified(Uuid::new_v4(), UserId::from(1), Utc::now())
            .await;

        assert!(matches!(
            result,
            Err(VerificationRepositoryError::DatabaseError(_))
        ));
    }

    // =====================================================
    // close
    // =====================================================

    #[tokio::test]
    async fn test_close_applied() {
        let mut record = issued("abc123");
        let id = record.id;
        record.close(CloseReason::RejectedByStaff).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![Model::from_domain(&record)]])
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let outcome = repo.close(id, CloseReason::RejectedByStaff).await.unwrap();

        assert!(matches!(
            outcome,
            TransitionOutcome::Applied(r) if r.status == VerificationStatus::Rejected
        ));
    }

    #[tokio::test]
    async fn test_close_lost_returns_current() {
        let record = issued("abc123");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![no_rows(), vec![verified_model(&record, 1, Utc::now())]])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let outcome = repo
            .close(record.id, CloseReason::RejectedByStaff)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            TransitionOutcome::Lost(r) if r.status == VerificationStatus::Verified
        ));
    }

    // =====================================================
    // replace (transaction)
    // =====================================================

    #[tokio::test]
    async fn test_replace_applied() {
        let old = issued("t1");
        let fresh = issued("t2");
        let mut expired = old.clone();
        expired.close(CloseReason::Regenerated).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // expire old, then insert fresh (both RETURNING)
            .append_query_results(vec![
                vec![Model::from_domain(&expired)],
                vec![Model::from_domain(&fresh)],
            ])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let outcome = repo.replace(old.id, fresh.clone()).await.unwrap();

        assert_eq!(outcome, TransitionOutcome::Applied(fresh));
    }

    #[tokio::test]
    async fn test_replace_lost_when_old_already_verified() {
        let old = issued("t1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // expire matched nothing, then re-read inside the transaction
            .append_query_results(vec![no_rows(), vec![verified_model(&old, 1, Utc::now())]])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let outcome = repo.replace(old.id, issued("t2")).await.unwrap();

        assert!(matches!(
            outcome,
            TransitionOutcome::Lost(r) if r.status == VerificationStatus::Verified
        ));
    }

    #[tokio::test]
    async fn test_replace_insert_failure_is_reported() {
        let old = issued("t1");
        let mut expired = old.clone();
        expired.close(CloseReason::Regenerated).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![Model::from_domain(&expired)]])
            .append_query_errors([DbErr::Custom("disk full".to_string())])
            .into_connection();

        let repo = VerificationRepositoryPostgres::new(Arc::new(db));
        let result = repo.replace(old.id, issued("t2")).await;

        assert!(matches!(
            result,
            Err(VerificationRepositoryError::DatabaseError(_))
        ));
    }
}
