pub mod registrations;
pub mod subject_members;
pub mod verification_records;
