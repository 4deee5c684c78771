pub mod auth;
pub mod verification;
