use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Registrations owned by the event platform, read-only here
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Registrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registrations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Registrations::SubjectKind).string_len(16).not_null())
                    .col(ColumnDef::new(Registrations::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Registrations::TargetKind).string_len(16).not_null())
                    .col(ColumnDef::new(Registrations::TargetId).big_integer().not_null())
                    .col(ColumnDef::new(Registrations::SubjectName).string().not_null())
                    .col(ColumnDef::new(Registrations::TargetName).string().not_null())
                    .col(
                        ColumnDef::new(Registrations::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Registrations::RequiresPayment)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Registrations::PaymentStatus)
                            .string_len(16)
                            .not_null()
                            .default("unpaid"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX uq_registrations_pair
                ON registrations (subject_kind, subject_id, target_kind, target_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS uq_registrations_pair;")
            .await?;

        manager
            .drop_table(Table::drop().table(Registrations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Registrations {
    Table,
    Id,
    SubjectKind,
    SubjectId,
    TargetKind,
    TargetId,
    SubjectName,
    TargetName,
    Status,
    RequiresPayment,
    PaymentStatus,
}
