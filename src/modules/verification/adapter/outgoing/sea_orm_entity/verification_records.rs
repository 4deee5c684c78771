use sea_orm::entity::prelude::*;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::domain::entities::{
    SubjectRef, TargetRef, VerificationRecord, VerificationToken,
};

/// Partial unique index: one `active`/`verified` row per pair.
pub const CURRENT_PAIR_INDEX: &str = "uq_verification_records_current_pair";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub subject_kind: String,

    pub subject_id: i64,

    pub target_kind: String,

    pub target_id: i64,

    #[sea_orm(unique)]
    pub token: String,

    pub status: String,

    pub verified_at: Option<DateTimeWithTimeZone>,

    pub verified_by: Option<i64>,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Result<VerificationRecord, String> {
        let subject = SubjectRef::new(self.subject_kind.parse()?, self.subject_id);
        let target = TargetRef::new(self.target_kind.parse()?, self.target_id);

        VerificationRecord::restore(
            self.id,
            subject,
            target,
            VerificationToken::from(self.token.clone()),
            self.status.parse()?,
            self.verified_at.map(Into::into),
            self.verified_by.map(UserId::from),
            self.created_at.into(),
        )
    }

    pub fn from_domain(record: &VerificationRecord) -> Self {
        Self {
            id: record.id,
            subject_kind: record.subject.kind.as_str().to_string(),
            subject_id: record.subject.id,
            target_kind: record.target.kind.as_str().to_string(),
            target_id: record.target.id,
            token: record.token.as_str().to_string(),
            status: record.status.as_str().to_string(),
            verified_at: record.verified_at().map(|t| t.fixed_offset()),
            verified_by: record.verified_by().map(i64::from),
            created_at: record.created_at.fixed_offset(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
