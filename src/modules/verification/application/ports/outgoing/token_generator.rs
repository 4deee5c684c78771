use crate::verification::application::domain::entities::VerificationToken;

pub trait TokenGenerator: Send + Sync {
    /// A fresh, unguessable, URL-safe token.
    fn generate(&self) -> VerificationToken;
}
