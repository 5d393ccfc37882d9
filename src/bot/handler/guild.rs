//! Guild availability handler.
//!
//! `guild_create` fires for every guild on startup and whenever the bot joins a new one.
//! The handler only reports whether the guild is set up for stream watching; the settings
//! themselves are never modified from gateway events.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, Guild};

use crate::data::stream_settings::StreamSettingsRepository;

/// Logs whether the guild has stream settings and which streamer it watches.
///
/// # Arguments
/// - `db` - Database connection for the settings lookup
/// - `_ctx` - Discord context (unused)
/// - `guild` - Guild that became available
/// - `is_new` - `Some(true)` when the bot just joined the guild
pub async fn handle_guild_create(
    db: &DatabaseConnection,
    _ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    let guild_id = guild.id.get().to_string();

    if is_new == Some(true) {
        tracing::info!(guild_id = %guild_id, "Joined guild {}", guild.name);
    }

    let repo = StreamSettingsRepository::new(db);

    match repo.get_config(&guild_id).await {
        Ok(Some(config)) => tracing::info!(
            guild_id = %guild_id,
            login = %config.streamer_login,
            live = config.last_stream_id.is_some(),
            "Watching stream for guild {}",
            guild.name
        ),
        Ok(None) => tracing::debug!(
            guild_id = %guild_id,
            "Guild {} has no stream settings",
            guild.name
        ),
        Err(e) => tracing::error!(
            guild_id = %guild_id,
            "Failed to load stream settings: {}",
            e
        ),
    }
}
