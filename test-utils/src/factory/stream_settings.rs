//! Stream settings factory for creating test rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test stream settings with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::stream_settings::StreamSettingsFactory;
///
/// let settings = StreamSettingsFactory::new(&db)
///     .guild_id("987654321")
///     .streamer_login("some_streamer")
///     .build()
///     .await?;
/// ```
pub struct StreamSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    streamer_login: String,
    notification_channel_id: String,
    lock_channel_id: Option<String>,
    last_stream_id: Option<String>,
    log_channel_id: Option<String>,
}

impl<'a> StreamSettingsFactory<'a> {
    /// Creates a new StreamSettingsFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: `"{id}"` where id is auto-incremented
    /// - streamer_login: `"streamer_{id}"`
    /// - notification_channel_id: `"{id + 1_000_000}"`
    /// - lock_channel_id: `None`
    /// - last_stream_id: `None`
    /// - log_channel_id: `None`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            streamer_login: format!("streamer_{}", id),
            notification_channel_id: (id + 1_000_000).to_string(),
            lock_channel_id: None,
            last_stream_id: None,
            log_channel_id: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn streamer_login(mut self, streamer_login: impl Into<String>) -> Self {
        self.streamer_login = streamer_login.into();
        self
    }

    pub fn notification_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.notification_channel_id = channel_id.into();
        self
    }

    pub fn lock_channel_id(mut self, channel_id: Option<String>) -> Self {
        self.lock_channel_id = channel_id;
        self
    }

    pub fn log_channel_id(mut self, channel_id: Option<String>) -> Self {
        self.log_channel_id = channel_id;
        self
    }

    /// Sets the persisted stream id; `Some` marks the guild as currently live.
    pub fn last_stream_id(mut self, stream_id: Option<String>) -> Self {
        self.last_stream_id = stream_id;
        self
    }

    /// Builds and inserts the stream settings row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::stream_settings::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::stream_settings::Model, DbErr> {
        let now = Utc::now();

        entity::stream_settings::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            streamer_login: ActiveValue::Set(self.streamer_login),
            notification_channel_id: ActiveValue::Set(self.notification_channel_id),
            lock_channel_id: ActiveValue::Set(self.lock_channel_id),
            last_stream_id: ActiveValue::Set(self.last_stream_id),
            log_channel_id: ActiveValue::Set(self.log_channel_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates stream settings with default values.
///
/// Shorthand for `StreamSettingsFactory::new(db).build().await`.
pub async fn create_stream_settings(
    db: &DatabaseConnection,
) -> Result<entity::stream_settings::Model, DbErr> {
    StreamSettingsFactory::new(db).build().await
}
