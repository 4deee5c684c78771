use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::shared::token_fingerprint::fingerprint;

//
// ──────────────────────────────────────────────────────────
// Subject / Target references
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    User,
    Participant,
    Team,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::User => "user",
            SubjectKind::Participant => "participant",
            SubjectKind::Team => "team",
        }
    }
}

impl FromStr for SubjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(SubjectKind::User),
            "participant" => Ok(SubjectKind::Participant),
            "team" => Ok(SubjectKind::Team),
            other => Err(format!("Unknown subject kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Event,
    SubEvent,
    Activity,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Event => "event",
            TargetKind::SubEvent => "sub_event",
            TargetKind::Activity => "activity",
        }
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(TargetKind::Event),
            "sub_event" => Ok(TargetKind::SubEvent),
            "activity" => Ok(TargetKind::Activity),
            other => Err(format!("Unknown target kind: {}", other)),
        }
    }
}

/// Who is being checked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct SubjectRef {
    pub kind: SubjectKind,
    pub id: i64,
}

impl SubjectRef {
    pub fn new(kind: SubjectKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

/// What the subject is being checked in against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub id: i64,
}

impl TargetRef {
    pub fn new(kind: TargetKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

//
// ──────────────────────────────────────────────────────────
// Token
// ──────────────────────────────────────────────────────────
//

/// Opaque single-use credential. `Debug` and `Display` print a fingerprint,
/// use `as_str` to get at the raw value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(&self.0)
    }
}

impl From<String> for VerificationToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for VerificationToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerificationToken({})", self.fingerprint())
    }
}

impl fmt::Display for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

//
// ──────────────────────────────────────────────────────────
// Status (state machine)
// ──────────────────────────────────────────────────────────
//

/// `Active` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Active,
    Verified,
    Expired,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Active => "active",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Expired => "expired",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerificationStatus::Active)
    }

    /// Active and verified records are the pair's current record;
    /// expired and rejected ones are superseded audit rows.
    pub fn is_current(&self) -> bool {
        matches!(
            self,
            VerificationStatus::Active | VerificationStatus::Verified
        )
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(VerificationStatus::Active),
            "verified" => Ok(VerificationStatus::Verified),
            "expired" => Ok(VerificationStatus::Expired),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(format!("Unknown verification status: {}", other)),
        }
    }
}

/// Who checked the subject in, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CheckInReceipt {
    pub verified_at: DateTime<Utc>,
    pub verified_by: UserId,
}

/// Why a record cannot be verified right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRejection {
    AlreadyUsed(CheckInReceipt),
    InvalidState(VerificationStatus),
}

/// The two failure transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// A fresh token replaced this one.
    Regenerated,
    /// Staff invalidated the code at the desk.
    RejectedByStaff,
}

impl CloseReason {
    pub fn status(&self) -> VerificationStatus {
        match self {
            CloseReason::Regenerated => VerificationStatus::Expired,
            CloseReason::RejectedByStaff => VerificationStatus::Rejected,
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Verification record
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRecord {
    pub id: Uuid,
    pub subject: SubjectRef,
    pub target: TargetRef,
    pub token: VerificationToken,
    pub status: VerificationStatus,
    receipt: Option<CheckInReceipt>,
    pub created_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// A freshly issued record.
    pub fn issue(
        subject: SubjectRef,
        target: TargetRef,
        token: VerificationToken,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject,
            target,
            token,
            status: VerificationStatus::Active,
            receipt: None,
            created_at,
        }
    }

    /// Rebuild a persisted record. Audit fields must be present exactly when
    /// the status is `verified`; anything else is reported as corrupt.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        subject: SubjectRef,
        target: TargetRef,
        token: VerificationToken,
        status: VerificationStatus,
        verified_at: Option<DateTime<Utc>>,
        verified_by: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, String> {
        let receipt = match (status, verified_at, verified_by) {
            (VerificationStatus::Verified, Some(verified_at), Some(verified_by)) => {
                Some(CheckInReceipt {
                    verified_at,
                    verified_by,
                })
            }
            (VerificationStatus::Verified, _, _) => {
                return Err(format!("record {} is verified without audit fields", id));
            }
            (_, None, None) => None,
            (_, _, _) => {
                return Err(format!(
                    "record {} carries audit fields while {}",
                    id,
                    status.as_str()
                ));
            }
        };

        Ok(Self {
            id,
            subject,
            target,
            token,
            status,
            receipt,
            created_at,
        })
    }

    pub fn receipt(&self) -> Option<CheckInReceipt> {
        self.receipt
    }

    pub fn verified_at(&self) -> Option<DateTime<Utc>> {
        self.receipt.map(|r| r.verified_at)
    }

    pub fn verified_by(&self) -> Option<UserId> {
        self.receipt.map(|r| r.verified_by)
    }

    pub fn is_active(&self) -> bool {
        self.status == VerificationStatus::Active
    }

    /// Step 2 of verification: only active records may be honored.
    pub fn ensure_verifiable(&self) -> Result<(), TransitionRejection> {
        match (self.status, self.receipt) {
            (VerificationStatus::Active, _) => Ok(()),
            (VerificationStatus::Verified, Some(receipt)) => {
                Err(TransitionRejection::AlreadyUsed(receipt))
            }
            (status, _) => Err(TransitionRejection::InvalidState(status)),
        }
    }

    /// Apply the success transition in memory. Persistence adapters perform
    /// the same transition as a conditional update.
    pub fn mark_verified(
        &mut self,
        verified_by: UserId,
        verified_at: DateTime<Utc>,
    ) -> Result<CheckInReceipt, TransitionRejection> {
        self.ensure_verifiable()?;

        let receipt = CheckInReceipt {
            verified_at,
            verified_by,
        };
        self.status = VerificationStatus::Verified;
        self.receipt = Some(receipt);
        Ok(receipt)
    }

    /// Failure transition out of `active`.
    pub fn close(&mut self, reason: CloseReason) -> Result<(), TransitionRejection> {
        self.ensure_verifiable()?;
        self.status = reason.status();
        Ok(())
    }
}
