use std::str::FromStr;

/// Registration state as maintained by the event platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Confirmed,
    Rejected,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Rejected => "rejected",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RegistrationStatus::Pending),
            "approved" => Ok(RegistrationStatus::Approved),
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "rejected" => Ok(RegistrationStatus::Rejected),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            other => Err(format!("Unknown registration status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    Pending,
    Confirmed,
    Rejected,
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "pending" => Ok(PaymentStatus::Pending),
            "confirmed" => Ok(PaymentStatus::Confirmed),
            "rejected" => Ok(PaymentStatus::Rejected),
            other => Err(format!("Unknown payment status: {}", other)),
        }
    }
}

/// What the platform knows about one (subject, target) registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSnapshot {
    pub subject_name: String,
    pub target_name: String,
    pub status: RegistrationStatus,
    pub requires_payment: bool,
    pub payment_status: PaymentStatus,
}
