use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use std::sync::Arc;

use crate::verification::application::{
    domain::entities::{
        SubjectRef, TargetRef, VerificationRecord, VerificationStatus, VerificationToken,
    },
    ports::outgoing::{VerificationQuery, VerificationQueryError},
};

use super::sea_orm_entity::verification_records::{Column, Entity, Model};

#[derive(Debug, Clone)]
pub struct VerificationQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl VerificationQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> VerificationQueryError {
    VerificationQueryError::DatabaseError(e.to_string())
}

fn to_domain(model: Option<Model>) -> Result<Option<VerificationRecord>, VerificationQueryError> {
    model
        .map(|m| m.to_domain())
        .transpose()
        .map_err(VerificationQueryError::CorruptRecord)
}

#[async_trait]
impl VerificationQuery for VerificationQueryPostgres {
    async fn find_by_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<VerificationRecord>, VerificationQueryError> {
        let model = Entity::find()
            .filter(Column::Token.eq(token.as_str()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        to_domain(model)
    }

    async fn find_current(
        &self,
        subject: &SubjectRef,
        target: &TargetRef,
    ) -> Result<Option<VerificationRecord>, VerificationQueryError> {
        let model = Entity::find()
            .filter(Column::SubjectKind.eq(subject.kind.as_str()))
            .filter(Column::SubjectId.eq(subject.id))
            .filter(Column::TargetKind.eq(target.kind.as_str()))
            .filter(Column::TargetId.eq(target.id))
            .filter(Column::Status.is_in([
                VerificationStatus::Active.as_str(),
                VerificationStatus::Verified.as_str(),
            ]))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        to_domain(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use crate::verification::application::domain::entities::{SubjectKind, TargetKind};

    fn record_model(token: &str, status: &str) -> Model {
        let now = Utc::now().fixed_offset();
        Model {
            id: Uuid::new_v4(),
            subject_kind: "participant".to_string(),
            subject_id: 42,
            target_kind: "event".to_string(),
            target_id: 7,
            token: token.to_string(),
            status: status.to_string(),
            verified_at: None,
            verified_by: None,
            created_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_by_token_found() {
        let model = record_model("abc123", "active");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let query = VerificationQueryPostgres::new(Arc::new(db));
        let record = query
            .find_by_token(&VerificationToken::from("abc123"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.id, model.id);
        assert_eq!(record.status, VerificationStatus::Active);
        assert_eq!(record.subject, SubjectRef::new(SubjectKind::Participant, 42));
    }

    #[tokio::test]
    async fn test_find_by_token_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let query = VerificationQueryPostgres::new(Arc::new(db));
        let result = query
            .find_by_token(&VerificationToken::from("nope"))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_current_reports_corrupt_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![record_model("abc123", "used")]])
            .into_connection();

        let query = VerificationQueryPostgres::new(Arc::new(db));
        let result = query
            .find_current(
                &SubjectRef::new(SubjectKind::Participant, 42),
                &TargetRef::new(TargetKind::Event, 7),
            )
            .await;

        assert!(matches!(result, Err(VerificationQueryError::CorruptRecord(_))));
    }

    #[tokio::test]
    async fn test_find_current_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let query = VerificationQueryPostgres::new(Arc::new(db));
        let result = query
            .find_current(
                &SubjectRef::new(SubjectKind::Participant, 42),
                &TargetRef::new(TargetKind::Event, 7),
            )
            .await;

        assert!(matches!(result, Err(VerificationQueryError::DatabaseError(_))));
    }
}
