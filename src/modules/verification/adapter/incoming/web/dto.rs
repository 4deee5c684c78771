use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::verification::application::{
    domain::{
        entities::{CheckInReceipt, SubjectKind, SubjectRef, TargetKind, TargetRef, VerificationRecord},
        policies::Eligibility,
    },
    ports::incoming::use_cases::DisplayNames,
    presenter::{render_status, VerificationPresenter, VerificationView},
};

//
// ──────────────────────────────────────────────────────────
// Requests
// ──────────────────────────────────────────────────────────
//

/// Identifies a (subject, target) pair, as a JSON body or as path segments.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct PairRequest {
    #[schema(example = "participant")]
    pub subject_kind: SubjectKind,
    #[schema(example = 42)]
    pub subject_id: i64,
    #[schema(example = "event")]
    pub target_kind: TargetKind,
    #[schema(example = 7)]
    pub target_id: i64,
}

impl PairRequest {
    pub fn subject(&self) -> SubjectRef {
        SubjectRef::new(self.subject_kind, self.subject_id)
    }

    pub fn target(&self) -> TargetRef {
        TargetRef::new(self.target_kind, self.target_id)
    }
}

//
// ──────────────────────────────────────────────────────────
// Responses
// ──────────────────────────────────────────────────────────
//

/// The subject's own view of its code.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerificationCodeResponse {
    #[serde(flatten)]
    pub verification: VerificationView,
    pub token: String,
    pub verification_url: String,
}

impl VerificationCodeResponse {
    pub fn new(record: &VerificationRecord, presenter: &VerificationPresenter) -> Self {
        Self {
            verification: render_status(record),
            token: record.token.as_str().to_string(),
            verification_url: presenter.url_for(&record.token),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckInResponse {
    pub verification: VerificationView,
    pub subject_name: String,
    pub target_name: String,
}

impl CheckInResponse {
    pub fn new(record: &VerificationRecord, names: DisplayNames) -> Self {
        Self {
            verification: render_status(record),
            subject_name: names.subject_name,
            target_name: names.target_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    pub verification: VerificationView,
    pub subject_name: String,
    pub target_name: String,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ineligible_reason: Option<String>,
}

impl PreviewResponse {
    pub fn new(record: &VerificationRecord, names: DisplayNames, eligibility: Eligibility) -> Self {
        let (eligible, ineligible_reason) = match eligibility {
            Eligibility::Eligible => (true, None),
            Eligibility::Ineligible(reason) => (false, Some(reason)),
        };

        Self {
            verification: render_status(record),
            subject_name: names.subject_name,
            target_name: names.target_name,
            eligible,
            ineligible_reason,
        }
    }
}

/// `details` of an `ALREADY_USED` error.
pub fn receipt_details(receipt: &CheckInReceipt) -> serde_json::Value {
    serde_json::json!({
        "verified_at": receipt.verified_at,
        "verified_by": receipt.verified_by,
    })
}
