use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

use crate::verification::application::{
    domain::entities::VerificationToken, ports::outgoing::TokenGenerator,
};

/// `[A-Za-z0-9]{length}` from the operating system's CSPRNG.
#[derive(Debug, Clone)]
pub struct RandomTokenGenerator {
    length: usize,
}

impl RandomTokenGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> VerificationToken {
        let token: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();

        VerificationToken::from(token)
    }
}
