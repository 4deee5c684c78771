use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users allowed to act for a participant or team
        manager
            .create_table(
                Table::create()
                    .table(SubjectMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SubjectMembers::SubjectKind).string_len(16).not_null())
                    .col(ColumnDef::new(SubjectMembers::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(SubjectMembers::UserId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(SubjectMembers::SubjectKind)
                            .col(SubjectMembers::SubjectId)
                            .col(SubjectMembers::UserId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubjectMembers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SubjectMembers {
    Table,
    SubjectKind,
    SubjectId,
    UserId,
}
