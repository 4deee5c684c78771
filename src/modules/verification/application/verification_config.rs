use crate::shared::config::{self, ConfigError};
use crate::verification::application::presenter::{
    QrErrorCorrection, VerificationLinks, VerificationPresenter,
};

/// Shortest token we are willing to hand out.
pub const MIN_TOKEN_LENGTH: usize = 16;

#[derive(Debug, Clone)]
pub struct VerificationConfig {
    pub public_base_url: String,
    pub role_segment: String,
    pub qr_error_correction: QrErrorCorrection,
    pub token_length: usize,
}

impl VerificationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let public_base_url = config::required("PUBLIC_BASE_URL")?;
        let role_segment = config::or_default("VERIFY_ROLE_SEGMENT", "admin");
        let qr_error_correction =
            config::parsed_or_default("QR_EC_LEVEL", QrErrorCorrection::Medium)?;
        let token_length = config::parsed_or_default("VERIFICATION_TOKEN_LENGTH", 32_usize)?;

        Self::new(
            public_base_url,
            role_segment,
            qr_error_correction,
            token_length,
        )
    }

    pub fn new(
        public_base_url: String,
        role_segment: String,
        qr_error_correction: QrErrorCorrection,
        token_length: usize,
    ) -> Result<Self, ConfigError> {
        if token_length < MIN_TOKEN_LENGTH {
            return Err(ConfigError::Invalid {
                key: "VERIFICATION_TOKEN_LENGTH".to_string(),
                value: token_length.to_string(),
            });
        }

        Ok(Self {
            public_base_url,
            role_segment,
            qr_error_correction,
            token_length,
        })
    }

    pub fn presenter(&self) -> VerificationPresenter {
        VerificationPresenter::new(
            VerificationLinks::new(self.public_base_url.clone(), self.role_segment.clone()),
            self.qr_error_correction,
        )
    }
}
