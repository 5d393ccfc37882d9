//! Stream settings repository and the store seam used by the reconciler.
//!
//! A guild's settings row holds the watched Twitch login, the announcement and lock
//! channels, and `last_stream_id`, the durable witness of the live state. Lock roles live
//! in their own table and are folded into `GuildStreamConfig` at this boundary.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::model::stream::{GuildStreamConfig, UpsertStreamSettingsParam};

/// Repository providing database operations for per-guild stream settings.
pub struct StreamSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StreamSettingsRepository<'a> {
    /// Creates a new StreamSettingsRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the stream settings of every configured guild, ordered by guild ID.
    ///
    /// # Returns
    /// - `Ok(Vec<GuildStreamConfig>)` - All configured guilds with their lock roles
    /// - `Err(DbErr)` - Database error during query
    pub async fn list_configs(&self) -> Result<Vec<GuildStreamConfig>, DbErr> {
        let rows = entity::prelude::StreamSettings::find()
            .order_by_asc(entity::stream_settings::Column::GuildId)
            .find_with_related(entity::prelude::StreamLockRole)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(settings, roles)| GuildStreamConfig::from_entity(settings, roles))
            .collect())
    }

    /// Gets the stream settings for one guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID as a string slice
    ///
    /// # Returns
    /// - `Ok(Some(GuildStreamConfig))` - Settings found
    /// - `Ok(None)` - Guild has not enabled stream watching
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_config(&self, guild_id: &str) -> Result<Option<GuildStreamConfig>, DbErr> {
        let Some(settings) = entity::prelude::StreamSettings::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let roles = settings
            .find_related(entity::prelude::StreamLockRole)
            .all(self.db)
            .await?;

        Ok(Some(GuildStreamConfig::from_entity(settings, roles)))
    }

    /// Records the stream the reconciler last acted on for a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `last_stream_id` - `Some` once a stream was announced, `None` after it ended
    ///
    /// # Returns
    /// - `Ok(())` - Row updated
    /// - `Err(DbErr::RecordNotFound)` - Guild has no settings row
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_last_stream_id(
        &self,
        guild_id: &str,
        last_stream_id: Option<String>,
    ) -> Result<(), DbErr> {
        let Some(existing) = entity::prelude::StreamSettings::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
        else {
            return Err(DbErr::RecordNotFound(format!(
                "stream settings for guild {}",
                guild_id
            )));
        };

        let mut active = existing.into_active_model();
        active.last_stream_id = ActiveValue::Set(last_stream_id);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Creates or updates a guild's stream settings.
    ///
    /// On update `created_at` is preserved. When the watched login changes, `last_stream_id`
    /// is cleared so the new streamer's current session is announced; otherwise it is kept.
    ///
    /// # Arguments
    /// - `param` - Settings to store
    ///
    /// # Returns
    /// - `Ok(GuildStreamConfig)` - The stored settings including existing lock roles
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(
        &self,
        param: UpsertStreamSettingsParam,
    ) -> Result<GuildStreamConfig, DbErr> {
        let existing = entity::prelude::StreamSettings::find_by_id(param.guild_id.clone())
            .one(self.db)
            .await?;

        let now = Utc::now();

        let settings = if let Some(existing) = existing {
            let last_stream_id = if existing.streamer_login == param.streamer_login {
                existing.last_stream_id.clone()
            } else {
                None
            };

            let mut active = existing.into_active_model();
            active.streamer_login = ActiveValue::Set(param.streamer_login);
            active.notification_channel_id = ActiveValue::Set(param.notification_channel_id);
            active.lock_channel_id = ActiveValue::Set(param.lock_channel_id);
            active.log_channel_id = ActiveValue::Set(param.log_channel_id);
            active.last_stream_id = ActiveValue::Set(last_stream_id);
            active.updated_at = ActiveValue::Set(now);
            active.update(self.db).await?
        } else {
            entity::stream_settings::ActiveModel {
                guild_id: ActiveValue::Set(param.guild_id),
                streamer_login: ActiveValue::Set(param.streamer_login),
                notification_channel_id: ActiveValue::Set(param.notification_channel_id),
                lock_channel_id: ActiveValue::Set(param.lock_channel_id),
                last_stream_id: ActiveValue::Set(None),
                log_channel_id: ActiveValue::Set(param.log_channel_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(self.db)
            .await?
        };

        let roles = settings
            .find_related(entity::prelude::StreamLockRole)
            .all(self.db)
            .await?;

        Ok(GuildStreamConfig::from_entity(settings, roles))
    }

    /// Replaces the set of roles hidden from the lock channel while live.
    ///
    /// Duplicate role IDs are stored once. The replacement runs in a transaction so a
    /// concurrent reader never sees a partially written set.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID with an existing settings row
    /// - `role_ids` - Discord role IDs to lock
    ///
    /// # Returns
    /// - `Ok(())` - Roles replaced
    /// - `Err(DbErr)` - Database error, including a foreign key violation for unknown guilds
    pub async fn set_lock_roles(&self, guild_id: &str, role_ids: &[String]) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::StreamLockRole::delete_many()
            .filter(entity::stream_lock_role::Column::GuildId.eq(guild_id))
            .exec(&txn)
            .await?;

        let mut unique: Vec<&String> = Vec::with_capacity(role_ids.len());
        for role_id in role_ids {
            if !unique.contains(&role_id) {
                unique.push(role_id);
            }
        }

        for role_id in unique {
            entity::stream_lock_role::ActiveModel {
                id: ActiveValue::NotSet,
                guild_id: ActiveValue::Set(guild_id.to_string()),
                role_id: ActiveValue::Set(role_id.clone()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await
    }
}

/// Persistence operations the reconciler depends on.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn list_configs(&self) -> Result<Vec<GuildStreamConfig>, DbErr>;

    async fn get_config(&self, guild_id: &str) -> Result<Option<GuildStreamConfig>, DbErr>;

    async fn update_last_stream_id(
        &self,
        guild_id: &str,
        last_stream_id: Option<String>,
    ) -> Result<(), DbErr>;
}

/// `SettingsStore` backed by the SeaORM connection.
pub struct DbSettingsStore {
    db: DatabaseConnection,
}

impl DbSettingsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsStore for DbSettingsStore {
    async fn list_configs(&self) -> Result<Vec<GuildStreamConfig>, DbErr> {
        StreamSettingsRepository::new(&self.db).list_configs().await
    }

    async fn get_config(&self, guild_id: &str) -> Result<Option<GuildStreamConfig>, DbErr> {
        StreamSettingsRepository::new(&self.db)
            .get_config(guild_id)
            .await
    }

    async fn update_last_stream_id(
        &self,
        guild_id: &str,
        last_stream_id: Option<String>,
    ) -> Result<(), DbErr> {
        StreamSettingsRepository::new(&self.db)
            .update_last_stream_id(guild_id, last_stream_id)
            .await
    }
}
