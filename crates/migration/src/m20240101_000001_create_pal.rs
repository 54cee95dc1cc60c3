//! Create `pal` table.
//!
//! `sid` is numeric so the "next seat id" query can sort on it directly.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pal::Table)
                    .if_not_exists()
                    .col(uuid(Pal::Id).primary_key())
                    .col(string_len(Pal::Name, 64).not_null())
                    .col(big_integer(Pal::Sid).not_null())
                    .col(string_len(Pal::Attribute, 128).not_null().default(""))
                    .col(string_len(Pal::WorkCompatibility, 255).not_null().default(""))
                    .col(string_len(Pal::Image, 512).not_null().default(""))
                    .col(timestamp_with_time_zone(Pal::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Pal::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pal::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pal { Table, Id, Name, Sid, Attribute, WorkCompatibility, Image, CreatedAt, UpdatedAt }
