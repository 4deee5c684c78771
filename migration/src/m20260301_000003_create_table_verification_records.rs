use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create verification_records table
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(VerificationRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerificationRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_owned()),
                    )
                    .col(
                        ColumnDef::new(VerificationRecords::SubjectKind)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRecords::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRecords::TargetKind)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRecords::TargetId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRecords::Token)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(VerificationRecords::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(VerificationRecords::VerifiedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRecords::VerifiedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Constraints
        // =====================================================

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE verification_records
                ADD CONSTRAINT chk_verification_records_status
                CHECK (status IN ('active', 'verified', 'expired', 'rejected'));
                "#,
            )
            .await?;

        // Audit fields are set exactly when the record is verified
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE verification_records
                ADD CONSTRAINT chk_verification_records_audit
                CHECK (
                    (status = 'verified' AND verified_at IS NOT NULL AND verified_by IS NOT NULL)
                    OR
                    (status <> 'verified' AND verified_at IS NULL AND verified_by IS NULL)
                );
                "#,
            )
            .await?;

        // At most one active or verified record per (subject, target)
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX uq_verification_records_current_pair
                ON verification_records (subject_kind, subject_id, target_kind, target_id)
                WHERE status IN ('active', 'verified');
                "#,
            )
            .await?;

        // History lookups per pair
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_verification_records_pair
                ON verification_records (subject_kind, subject_id, target_kind, target_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS uq_verification_records_current_pair;
                DROP INDEX IF EXISTS idx_verification_records_pair;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VerificationRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VerificationRecords {
    Table,
    Id,
    SubjectKind,
    SubjectId,
    TargetKind,
    TargetId,
    Token,
    Status,
    VerifiedAt,
    VerifiedBy,
    CreatedAt,
}
