use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Row existence = connected; deletion = disconnected. The primary key
        // keeps each connection id to a single row. The table lands in the
        // schema named by the search path.
        manager
            .create_table(
                Table::create()
                    .table(Connections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Connections::ConnectionId)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Connections::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Connections {
    Table,
    ConnectionId,
}
