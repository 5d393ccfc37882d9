use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StreamSettings::Table)
                    .if_not_exists()
                    .col(string(StreamSettings::GuildId).primary_key())
                    .col(string(StreamSettings::StreamerLogin))
                    .col(string(StreamSettings::NotificationChannelId))
                    .col(string_null(StreamSettings::LockChannelId))
                    .col(string_null(StreamSettings::LastStreamId))
                    .col(timestamp(StreamSettings::CreatedAt))
                    .col(timestamp(StreamSettings::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StreamSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StreamSettings {
    Table,
    GuildId,
    StreamerLogin,
    NotificationChannelId,
    LockChannelId,
    LastStreamId,
    LogChannelId,
    CreatedAt,
    UpdatedAt,
}
