use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::{
    domain::{
        entities::{SubjectKind, SubjectRef, TargetRef},
        registration::RegistrationSnapshot,
    },
    ports::outgoing::{RegistrationLookup, RegistrationLookupError},
};

use super::sea_orm_entity::{registrations, subject_members};

#[derive(Debug, Clone)]
pub struct RegistrationLookupPostgres {
    db: Arc<DatabaseConnection>,
}

impl RegistrationLookupPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> RegistrationLookupError {
    RegistrationLookupError::DatabaseError(e.to_string())
}

#[async_trait]
impl RegistrationLookup for RegistrationLookupPostgres {
    async fn find_registration(
        &self,
        subject: &SubjectRef,
        target: &TargetRef,
    ) -> Result<Option<RegistrationSnapshot>, RegistrationLookupError> {
        let row = registrations::Entity::find()
            .filter(registrations::Column::SubjectKind.eq(subject.kind.as_str()))
            .filter(registrations::Column::SubjectId.eq(subject.id))
            .filter(registrations::Column::TargetKind.eq(target.kind.as_str()))
            .filter(registrations::Column::TargetId.eq(target.id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        row.map(|r| r.to_snapshot())
            .transpose()
            .map_err(RegistrationLookupError::CorruptRow)
    }

    async fn can_act_for(
        &self,
        user: UserId,
        subject: &SubjectRef,
    ) -> Result<bool, RegistrationLookupError> {
        if subject.kind == SubjectKind::User {
            return Ok(subject.id == user.value());
        }

        let membership = subject_members::Entity::find()
            .filter(subject_members::Column::SubjectKind.eq(subject.kind.as_str()))
            .filter(subject_members::Column::SubjectId.eq(subject.id))
            .filter(subject_members::Column::UserId.eq(user.value()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(membership.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::verification::application::domain::{
        entities::TargetKind,
        registration::{PaymentStatus, RegistrationStatus},
    };

    fn registration_row(status: &str, payment_status: &str) -> registrations::Model {
        registrations::Model {
            id: 1,
            subject_kind: "participant".to_string(),
            subject_id: 42,
            target_kind: "event".to_string(),
            target_id: 7,
            subject_name: "Ayu Lestari".to_string(),
            target_name: "DevFest Kupang".to_string(),
            status: status.to_string(),
            requires_payment: true,
            payment_status: payment_status.to_string(),
        }
    }

    fn pair() -> (SubjectRef, TargetRef) {
        (
            SubjectRef::new(SubjectKind::Participant, 42),
            TargetRef::new(TargetKind::Event, 7),
        )
    }

    #[tokio::test]
    async fn test_find_registration_maps_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![registration_row("approved", "confirmed")]])
            .into_connection();

        let lookup = RegistrationLookupPostgres::new(Arc::new(db));
        let (subject, target) = pair();
        let snapshot = lookup
            .find_registration(&subject, &target)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(snapshot.status, RegistrationStatus::Approved);
        assert_eq!(snapshot.payment_status, PaymentStatus::Confirmed);
        assert!(snapshot.requires_payment);
        assert_eq!(snapshot.subject_name, "Ayu Lestari");
    }

    #[tokio::test]
    async fn test_find_registration_unknown_status_is_corrupt() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![registration_row("waitlisted", "unpaid")]])
            .into_connection();

        let lookup = RegistrationLookupPostgres::new(Arc::new(db));
        let (subject, target) = pair();
        let result = lookup.find_registration(&subject, &target).await;

        assert!(matches!(result, Err(RegistrationLookupError::CorruptRow(_))));
    }

    #[tokio::test]
    async fn test_user_subject_needs_no_query() {
        // No results appended: any query would fail.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let lookup = RegistrationLookupPostgres::new(Arc::new(db));

        let subject = SubjectRef::new(SubjectKind::User, 8);

        assert!(lookup.can_act_for(UserId::from(8), &subject).await.unwrap());
        assert!(!lookup.can_act_for(UserId::from(9), &subject).await.unwrap());
    }

    #[tokio::test]
    async fn test_team_member_may_act() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![subject_members::Model {
                subject_kind: "team".to_string(),
                subject_id: 3,
                user_id: 8,
            }]])
            .append_query_results(vec![Vec::<subject_members::Model>::new()])
            .into_connection();

        let lookup = RegistrationLookupPostgres::new(Arc::new(db));
        let team = SubjectRef::new(SubjectKind::Team, 3);

        assert!(lookup.can_act_for(UserId::from(8), &team).await.unwrap());
        assert!(!lookup.can_act_for(UserId::from(9), &team).await.unwrap());
    }
}
