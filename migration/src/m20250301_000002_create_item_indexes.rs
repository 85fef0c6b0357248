use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_items::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, column) in [
            ("idx_items_date_lost_or_found", Items::DateLostOrFound),
            ("idx_items_status", Items::Status),
            ("idx_items_category", Items::Category),
            ("idx_items_active", Items::Active),
            ("idx_items_created_at", Items::CreatedAt),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Items::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_items_date_lost_or_found",
            "idx_items_status",
            "idx_items_category",
            "idx_items_active",
            "idx_items_created_at",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Items::Table).to_owned())
                .await?;
        }

        Ok(())
    }
}
