use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::domain::entities::{
    SubjectRef, TargetKind, TargetRef, VerificationRecord, VerificationStatus,
};

/// User-facing status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum StatusLabel {
    Active,
    Verified,
    Used,
    Expired,
    Rejected,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Active => "Active",
            StatusLabel::Verified => "Verified",
            StatusLabel::Used => "Used",
            StatusLabel::Expired => "Expired",
            StatusLabel::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct VerificationView {
    pub id: Uuid,
    pub subject: SubjectRef,
    pub target: TargetRef,
    pub status: VerificationStatus,
    pub label: StatusLabel,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

fn label_for(status: VerificationStatus, target: &TargetRef) -> StatusLabel {
    match status {
        VerificationStatus::Active => StatusLabel::Active,
        // Activity codes are consumed, attendance codes confirm a person.
        VerificationStatus::Verified => match target.kind {
            TargetKind::Activity => StatusLabel::Used,
            TargetKind::Event | TargetKind::SubEvent => StatusLabel::Verified,
        },
        VerificationStatus::Expired => StatusLabel::Expired,
        VerificationStatus::Rejected => StatusLabel::Rejected,
    }
}

pub fn render_status(record: &VerificationRecord) -> VerificationView {
    VerificationView {
        id: record.id,
        subject: record.subject,
        target: record.target,
        status: record.status,
        label: label_for(record.status, &record.target),
        verified_at: record.verified_at(),
        verified_by: record.verified_by(),
        created_at: record.created_at,
    }
}
