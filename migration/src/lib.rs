pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_table_registrations;
mod m20260301_000002_create_table_subject_members;
mod m20260301_000003_create_table_verification_records;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_table_registrations::Migration),
            Box::new(m20260301_000002_create_table_subject_members::Migration),
            Box::new(m20260301_000003_create_table_verification_records::Migration),
        ]
    }
}
