use sea_orm::entity::prelude::*;

use crate::verification::application::domain::registration::RegistrationSnapshot;

/// Maintained by the event platform; read-only here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub subject_kind: String,

    pub subject_id: i64,

    pub target_kind: String,

    pub target_id: i64,

    pub subject_name: String,

    pub target_name: String,

    pub status: String,

    pub requires_payment: bool,

    pub payment_status: String,
}

impl Model {
    pub fn to_snapshot(&self) -> Result<RegistrationSnapshot, String> {
        Ok(RegistrationSnapshot {
            subject_name: self.subject_name.clone(),
            target_name: self.target_name.clone(),
            status: self.status.parse()?,
            requires_payment: self.requires_payment,
            payment_status: self.payment_status.parse()?,
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
