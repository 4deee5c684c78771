use crate::auth::application::domain::entities::Actor;
use crate::verification::application::{
    domain::entities::SubjectRef,
    ports::outgoing::{RegistrationLookup, RegistrationLookupError},
};

/// Staff may act for anyone; everyone else only for subjects they belong to.
pub(super) async fn may_act_for<L>(
    lookup: &L,
    actor: &Actor,
    subject: &SubjectRef,
) -> Result<bool, RegistrationLookupError>
where
    L: RegistrationLookup + ?Sized,
{
    if actor.role.is_staff() {
        return Ok(true);
    }

    lookup.can_act_for(actor.user_id, subject).await
}
