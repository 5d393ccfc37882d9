use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_stream_settings_table::StreamSettings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StreamLockRole::Table)
                    .if_not_exists()
                    .col(pk_auto(StreamLockRole::Id))
                    .col(string(StreamLockRole::GuildId))
                    .col(string(StreamLockRole::RoleId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stream_lock_role_guild_id")
                            .from(StreamLockRole::Table, StreamLockRole::GuildId)
                            .to(StreamSettings::Table, StreamSettings::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A role is locked at most once per guild
        manager
            .create_index(
                Index::create()
                    .name("idx_stream_lock_role_guild_role")
                    .table(StreamLockRole::Table)
                    .col(StreamLockRole::GuildId)
                    .col(StreamLockRole::RoleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_stream_lock_role_guild_role")
                    .table(StreamLockRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StreamLockRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StreamLockRole {
    Table,
    Id,
    GuildId,
    RoleId,
}
