use crate::verification::application::domain::{
    entities::{TargetKind, TargetRef},
    registration::{PaymentStatus, RegistrationSnapshot, RegistrationStatus},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Ineligible(String),
}

/// Business rule evaluated before a check-in is committed.
///
/// Events and sub-events admit only approved/confirmed registrations, and
/// paid ones only once the payment is confirmed. Activity codes carry no
/// rule of their own.
pub fn evaluate_eligibility(
    target: &TargetRef,
    snapshot: Option<&RegistrationSnapshot>,
) -> Eligibility {
    match target.kind {
        TargetKind::Activity => Eligibility::Eligible,
        TargetKind::Event | TargetKind::SubEvent => match snapshot {
            None => Eligibility::Ineligible("No registration found for this subject".to_string()),
            Some(registration) => evaluate_registration(registration),
        },
    }
}

fn evaluate_registration(registration: &RegistrationSnapshot) -> Eligibility {
    match registration.status {
        RegistrationStatus::Approved | RegistrationStatus::Confirmed => {}
        other => {
            return Eligibility::Ineligible(format!("Registration is {}", other.as_str()));
        }
    }

    if registration.requires_payment && registration.payment_status != PaymentStatus::Confirmed {
        return Eligibility::Ineligible("Payment has not been confirmed".to_string());
    }

    Eligibility::Eligible
}
