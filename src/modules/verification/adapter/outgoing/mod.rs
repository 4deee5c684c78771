pub mod random_token_generator;
pub mod registration_lookup_postgres;
pub mod sea_orm_entity;
pub mod verification_query_postgres;
pub mod verification_repository_postgres;

pub use random_token_generator::RandomTokenGenerator;
pub use registration_lookup_postgres::RegistrationLookupPostgres;
pub use verification_query_postgres::VerificationQueryPostgres;
pub use verification_repository_postgres::VerificationRepositoryPostgres;
