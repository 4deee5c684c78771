pub mod api;
pub mod config;
pub mod token_fingerprint;
