use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lookups by name back delete/update/find
        manager
            .create_index(
                Index::create()
                    .name("uniq_pal_name")
                    .table(Pal::Table)
                    .col(Pal::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Two inserts racing across processes must not share a sid
        manager
            .create_index(
                Index::create()
                    .name("uniq_pal_sid")
                    .table(Pal::Table)
                    .col(Pal::Sid)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_pal_sid").table(Pal::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_pal_name").table(Pal::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pal { Table, Name, Sid }
