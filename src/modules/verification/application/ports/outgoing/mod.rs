mod registration_lookup;
mod token_generator;
mod verification_query;
mod verification_repository;

pub use registration_lookup::{RegistrationLookup, RegistrationLookupError};
pub use token_generator::TokenGenerator;
pub use verification_query::{VerificationQuery, VerificationQueryError};
pub use verification_repository::{
    TransitionOutcome, VerificationRepository, VerificationRepositoryError,
};
