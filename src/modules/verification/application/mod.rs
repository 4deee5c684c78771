pub mod domain;
pub mod ports;
pub mod presenter;
pub mod services;
pub mod verification_config;
pub mod verification_use_cases;
