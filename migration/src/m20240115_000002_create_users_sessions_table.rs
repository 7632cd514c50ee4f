use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UsersSessions::Table)
                    .col(
                        ColumnDef::new(UsersSessions::Token)
                            .string()
                            .not_null()
                            .primary_key()
                    )
                    .col(
                        ColumnDef::new(UsersSessions::UserId)
                            .big_integer()
                            .not_null()
                    )
                    // ms-epoch; logout rewrites this to 0, rows are never deleted
                    .col(
                        ColumnDef::new(UsersSessions::ExpiresAt)
                            .big_integer()
                            .not_null()
                    )
                    .to_owned()
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(UsersSessions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum UsersSessions {
    Table,
    Token,
    UserId,
    ExpiresAt,
}
