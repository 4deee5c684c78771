use std::sync::Arc;

use crate::verification::application::ports::incoming::use_cases::{
    GetCurrentVerificationUseCase, InvalidateVerificationUseCase, IssueVerificationUseCase,
    PreviewVerificationUseCase, RegenerateVerificationUseCase, VerifyTokenUseCase,
};

#[derive(Clone)]
pub struct VerificationUseCases {
    pub issue: Arc<dyn IssueVerificationUseCase + Send + Sync>,
    pub regenerate: Arc<dyn RegenerateVerificationUseCase + Send + Sync>,
    pub get_current: Arc<dyn GetCurrentVerificationUseCase + Send + Sync>,
    pub preview: Arc<dyn PreviewVerificationUseCase + Send + Sync>,
    pub verify: Arc<dyn VerifyTokenUseCase + Send + Sync>,
    pub invalidate: Arc<dyn InvalidateVerificationUseCase + Send + Sync>,
}
