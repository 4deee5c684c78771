use crate::tests::support::stubs::*;
use crate::verification::application::ports::incoming::use_cases::{
    GetCurrentVerificationUseCase, InvalidateVerificationUseCase, IssueVerificationUseCase,
    PreviewVerificationUseCase, RegenerateVerificationUseCase, VerifyTokenUseCase,
};
use crate::verification::application::presenter::{
    QrErrorCorrection, VerificationLinks, VerificationPresenter,
};
use crate::verification::application::verification_use_cases::VerificationUseCases;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

/// Builds an `AppState` whose use cases are stubs unless a test swaps one in.
pub struct TestAppStateBuilder {
    verification: VerificationUseCases,
    presenter: VerificationPresenter,
}

pub fn test_presenter() -> VerificationPresenter {
    VerificationPresenter::new(
        VerificationLinks::new("https://events.example.org", "admin"),
        QrErrorCorrection::Medium,
    )
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            verification: VerificationUseCases {
                issue: Arc::new(StubIssueVerificationUseCase),
                regenerate: Arc::new(StubRegenerateVerificationUseCase),
                get_current: Arc::new(StubGetCurrentVerificationUseCase),
                preview: Arc::new(StubPreviewVerificationUseCase),
                verify: Arc::new(StubVerifyTokenUseCase),
                invalidate: Arc::new(StubInvalidateVerificationUseCase),
            },
            presenter: test_presenter(),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_issue(mut self, uc: impl IssueVerificationUseCase + Send + Sync + 'static) -> Self {
        self.verification.issue = Arc::new(uc);
        self
    }

    pub fn with_regenerate(
        mut self,
        uc: impl RegenerateVerificationUseCase + Send + Sync + 'static,
    ) -> Self {
        self.verification.regenerate = Arc::new(uc);
        self
    }

    pub fn with_get_current(
        mut self,
        uc: impl GetCurrentVerificationUseCase + Send + Sync + 'static,
    ) -> Self {
        self.verification.get_current = Arc::new(uc);
        self
    }

    pub fn with_preview(
        mut self,
        uc: impl PreviewVerificationUseCase + Send + Sync + 'static,
    ) -> Self {
        self.verification.preview = Arc::new(uc);
        self
    }

    pub fn with_verify(mut self, uc: impl VerifyTokenUseCase + Send + Sync + 'static) -> Self {
        self.verification.verify = Arc::new(uc);
        self
    }

    pub fn with_invalidate(
        mut self,
        uc: impl InvalidateVerificationUseCase + Send + Sync + 'static,
    ) -> Self {
        self.verification.invalidate = Arc::new(uc);
        self
    }

    pub fn with_presenter(mut self, presenter: VerificationPresenter) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            verification: self.verification,
            verification_presenter: self.presenter,
        })
    }
}
