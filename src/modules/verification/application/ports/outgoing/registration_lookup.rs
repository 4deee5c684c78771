use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::domain::{
    entities::{SubjectRef, TargetRef},
    registration::RegistrationSnapshot,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistrationLookupError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt registration row: {0}")]
    CorruptRow(String),
}

/// Read-only view into the platform's registration and membership data.
#[async_trait]
pub trait RegistrationLookup: Send + Sync {
    async fn find_registration(
        &self,
        subject: &SubjectRef,
        target: &TargetRef,
    ) -> Result<Option<RegistrationSnapshot>, RegistrationLookupError>;

    /// Whether `user` is the subject itself or one of its members.
    async fn can_act_for(
        &self,
        user: UserId,
        subject: &SubjectRef,
    ) -> Result<bool, RegistrationLookupError>;
}
