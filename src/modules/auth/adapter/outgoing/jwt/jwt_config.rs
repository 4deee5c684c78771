use crate::shared::config::{self, ConfigError};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    /// The secret is shared with the platform that mints the tokens.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = config::required("JWT_SECRET")?;
        let issuer = config::or_default("JWT_ISSUER", "checkin");

        Ok(Self {
            secret_key,
            issuer,
        })
    }
}
