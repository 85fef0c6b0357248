use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Items::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Items::Title).string().not_null())
                    .col(ColumnDef::new(Items::Description).text().not_null())
                    .col(ColumnDef::new(Items::Category).string().not_null())
                    .col(ColumnDef::new(Items::Status).string().not_null())
                    .col(ColumnDef::new(Items::Location).string().null())
                    .col(ColumnDef::new(Items::Contact).string().not_null())
                    // Milliseconds since the Unix epoch, UTC
                    .col(ColumnDef::new(Items::DateLostOrFound).big_integer().null())
                    .col(
                        ColumnDef::new(Items::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Items::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Items {
    Table,
    Id,
    Title,
    Description,
    Category,
    Status,
    Location,
    Contact,
    DateLostOrFound,
    Active,
    CreatedAt,
}
