use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::verification::application::{
    domain::{
        entities::{
            SubjectRef, TargetRef, VerificationRecord, VerificationToken,
        },
        registration::{PaymentStatus, RegistrationSnapshot, RegistrationStatus},
    },
    ports::{
        incoming::use_cases::{
            GetCurrentVerificationError, GetCurrentVerificationUseCase,
            InvalidateVerificationError, InvalidateVerificationUseCase, IssueVerificationCommand,
            IssueVerificationError, IssueVerificationUseCase, IssuedVerification,
            PreviewVerificationError, PreviewVerificationUseCase, RegenerateVerificationError,
            RegenerateVerificationUseCase, VerificationPreview, VerificationResult,
            VerifyTokenError, VerifyTokenUseCase,
        },
        outgoing::{RegistrationLookup, RegistrationLookupError, TokenGenerator},
    },
};

// ──────────────────────────────────────────────────────────
// Outgoing port stubs
// ──────────────────────────────────────────────────────────

/// Answers every lookup with the same snapshot and membership verdict.
#[derive(Debug, Clone)]
pub struct StubRegistrationLookup {
    snapshot: Option<RegistrationSnapshot>,
    member: bool,
}

impl StubRegistrationLookup {
    /// Approved, free registration; every caller may act for every subject.
    pub fn approved() -> Self {
        Self::with_snapshot(Some(registration(
            RegistrationStatus::Approved,
            false,
            PaymentStatus::Unpaid,
        )))
    }

    pub fn with_snapshot(snapshot: Option<RegistrationSnapshot>) -> Self {
        Self {
            snapshot,
            member: true,
        }
    }

    pub fn not_member(mut self) -> Self {
        self.member = false;
        self
    }
}

#[async_trait]
impl RegistrationLookup for StubRegistrationLookup {
    async fn find_registration(
        &self,
        _subject: &SubjectRef,
        _target: &TargetRef,
    ) -> Result<Option<RegistrationSnapshot>, RegistrationLookupError> {
        Ok(self.snapshot.clone())
    }

    async fn can_act_for(
        &self,
        _user: UserId,
        _subject: &SubjectRef,
    ) -> Result<bool, RegistrationLookupError> {
        Ok(self.member)
    }
}

pub fn registration(
    status: RegistrationStatus,
    requires_payment: bool,
    payment_status: PaymentStatus,
) -> RegistrationSnapshot {
    RegistrationSnapshot {
        subject_name: "Ayu Lestari".to_string(),
        target_name: "DevFest Kupang".to_string(),
        status,
        requires_payment,
        payment_status,
    }
}

/// Hands out the queued tokens in order, then `token-<n>`.
#[derive(Debug, Default)]
pub struct SequenceTokenGenerator {
    queued: Mutex<VecDeque<String>>,
    counter: Mutex<u32>,
}

impl SequenceTokenGenerator {
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            queued: Mutex::new(tokens.iter().map(|t| t.to_string()).collect()),
            counter: Mutex::new(0),
        }
    }
}

impl TokenGenerator for SequenceTokenGenerator {
    fn generate(&self) -> VerificationToken {
        if let Some(next) = self.queued.lock().expect("queue poisoned").pop_front() {
            return VerificationToken::from(next);
        }

        let mut counter = self.counter.lock().expect("counter poisoned");
        *counter += 1;
        VerificationToken::from(format!("token-{}", *counter))
    }
}

// ──────────────────────────────────────────────────────────
// Default use case stubs for TestAppStateBuilder
// ──────────────────────────────────────────────────────────

const NOT_USED: &str = "not used in this test";

pub struct StubIssueVerificationUseCase;

#[async_trait]
impl IssueVerificationUseCase for StubIssueVerificationUseCase {
    async fn execute(
        &self,
        _command: IssueVerificationCommand,
    ) -> Result<IssuedVerification, IssueVerificationError> {
        Err(IssueVerificationError::RepositoryError(NOT_USED.to_string()))
    }
}

pub struct StubRegenerateVerificationUseCase;

#[async_trait]
impl RegenerateVerificationUseCase for StubRegenerateVerificationUseCase {
    async fn execute(
        &self,
        _command: IssueVerificationCommand,
    ) -> Result<VerificationRecord, RegenerateVerificationError> {
        Err(RegenerateVerificationError::RepositoryError(
            NOT_USED.to_string(),
        ))
    }
}

pub struct StubGetCurrentVerificationUseCase;

#[async_trait]
impl GetCurrentVerificationUseCase for StubGetCurrentVerificationUseCase {
    async fn execute(
        &self,
        _query: IssueVerificationCommand,
    ) -> Result<VerificationRecord, GetCurrentVerificationError> {
        Err(GetCurrentVerificationError::NotFound)
    }
}

pub struct StubPreviewVerificationUseCase;

#[async_trait]
impl PreviewVerificationUseCase for StubPreviewVerificationUseCase {
    async fn execute(
        &self,
        _token: VerificationToken,
    ) -> Result<VerificationPreview, PreviewVerificationError> {
        Err(PreviewVerificationError::NotFound)
    }
}

pub struct StubVerifyTokenUseCase;

#[async_trait]
impl VerifyTokenUseCase for StubVerifyTokenUseCase {
    async fn execute(
        &self,
        _token: VerificationToken,
        _verifying_identity: UserId,
    ) -> VerificationResult {
        Err(VerifyTokenError::NotFound)
    }
}

pub struct StubInvalidateVerificationUseCase;

#[async_trait]
impl InvalidateVerificationUseCase for StubInvalidateVerificationUseCase {
    async fn execute(
        &self,
        _token: VerificationToken,
        _rejected_by: UserId,
    ) -> Result<VerificationRecord, InvalidateVerificationError> {
        Err(InvalidateVerificationError::NotFound)
    }
}
