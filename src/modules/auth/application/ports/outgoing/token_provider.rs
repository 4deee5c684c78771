use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::auth::application::domain::entities::{Role, UserId};

#[derive(Debug)]
pub enum TokenError {
    TokenExpired,
    TokenNotYetValid,
    InvalidSignature,
    MalformedToken,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::TokenExpired => write!(f, "Token has expired"),
            TokenError::TokenNotYetValid => write!(f, "Token is not yet valid"),
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::MalformedToken => write!(f, "Malformed token"),
        }
    }
}
impl Error for TokenError {}

/// Claims of the access tokens minted by the event platform.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: UserId,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub token_type: String, // only "access" is accepted by the extractors
    pub role: Role,
}

pub trait TokenProvider: Send + Sync {
    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
