use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_stream_settings_table::StreamSettings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(StreamSettings::Table)
                    .add_column(string_null(StreamSettings::LogChannelId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(StreamSettings::Table)
                    .drop_column(StreamSettings::LogChannelId)
                    .to_owned(),
            )
            .await
    }
}
