use async_trait::async_trait;

use crate::auth::application::domain::entities::Actor;
use crate::verification::application::domain::entities::{
    SubjectRef, TargetRef, VerificationRecord,
};

//
// ──────────────────────────────────────────────────────────
// Issue Verification Command
// ──────────────────────────────────────────────────────────
//

/// Shared by Issue and Regenerate: who asks, for which pair.
#[derive(Debug, Clone, Copy)]
pub struct IssueVerificationCommand {
    actor: Actor,
    subject: SubjectRef,
    target: TargetRef,
}

impl IssueVerificationCommand {
    pub fn new(actor: Actor, subject: SubjectRef, target: TargetRef) -> Self {
        Self {
            actor,
            subject,
            target,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn subject(&self) -> &SubjectRef {
        &self.subject
    }

    pub fn target(&self) -> &TargetRef {
        &self.target
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssuedVerification {
    pub record: VerificationRecord,
    /// `false` when an existing current record was handed back.
    pub newly_issued: bool,
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum IssueVerificationError {
    #[error("Caller may not act for this subject")]
    Forbidden,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

/// Idempotent: returns the pair's current record if one exists.
#[async_trait]
pub trait IssueVerificationUseCase: Send + Sync {
    async fn execute(
        &self,
        command: IssueVerificationCommand,
    ) -> Result<IssuedVerification, IssueVerificationError>;
}
