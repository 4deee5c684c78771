use std::sync::Arc;

use crate::auth::application::{
    domain::entities::{Role, UserId},
    ports::outgoing::{TokenClaims, TokenError, TokenProvider},
};

/// Accepts any bearer token as an access token for the given user.
#[derive(Debug, Clone)]
pub struct StubTokenProvider {
    user_id: i64,
    role: Role,
}

impl TokenProvider for StubTokenProvider {
    fn verify_token(&self, _token: &str) -> Result<TokenClaims, TokenError> {
        Ok(TokenClaims {
            sub: UserId::from(self.user_id),
            exp: 9_999_999_999,
            iat: 0,
            nbf: 0,
            token_type: "access".to_string(),
            role: self.role,
        })
    }
}

pub fn stub_token_provider(user_id: i64, role: Role) -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(StubTokenProvider { user_id, role })
}

pub fn bearer() -> (&'static str, &'static str) {
    ("Authorization", "Bearer test-token")
}
