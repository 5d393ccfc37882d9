//! Live announcement message and embed formatting, plus log channel lines.

use serenity::all::{CreateEmbed, CreateMessage, Timestamp};
use std::path::Path;

use crate::{error::internal::InternalError, model::stream::LiveStream};

/// Twitch brand purple.
pub const TWITCH_COLOR: u32 = 0x9146FF;

const THUMBNAIL_WIDTH: &str = "320";
const THUMBNAIL_HEIGHT: &str = "180";

pub fn channel_url(login: &str) -> String {
    format!("https://twitch.tv/{}", login)
}

pub fn embed_title(stream: &LiveStream) -> String {
    format!("{} is now live on Twitch!", stream.streamer_display_name)
}

/// Message text sent alongside the embed, e.g. `@everyone Streamer is now live!`.
pub fn announcement_content(mention: &str, stream: &LiveStream) -> String {
    let text = format!("{} is now live!", stream.streamer_display_name);

    if mention.is_empty() {
        text
    } else {
        format!("{} {}", mention, text)
    }
}

/// Fills the `{width}`/`{height}` placeholders of a Helix preview URL.
pub fn thumbnail_url(template: &str) -> String {
    template
        .replace("{width}", THUMBNAIL_WIDTH)
        .replace("{height}", THUMBNAIL_HEIGHT)
}

/// Builds the live announcement embed.
///
/// Discord rejects empty embed fields, so missing game names fall back to a placeholder
/// and an empty stream title leaves the description out.
///
/// # Returns
/// - `Ok(CreateEmbed)` - Embed ready for posting
/// - `Err(InternalError::InvalidDiscordTimestamp)` - `started_at` is out of Discord's range
pub fn build_live_embed(stream: &LiveStream) -> Result<CreateEmbed, InternalError> {
    let started_at = stream.started_at.timestamp();
    let timestamp = Timestamp::from_unix_timestamp(started_at).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp: started_at,
            reason: e.to_string(),
        }
    })?;

    let game = if stream.game_name.is_empty() {
        "Unknown".to_string()
    } else {
        stream.game_name.clone()
    };

    let mut embed = CreateEmbed::new()
        .title(embed_title(stream))
        .url(channel_url(&stream.streamer_login))
        .field("Game", game, true)
        .field("Viewers", stream.viewer_count.to_string(), true)
        .timestamp(timestamp)
        .color(TWITCH_COLOR);

    if !stream.title.is_empty() {
        embed = embed.description(stream.title.clone());
    }

    if !stream.thumbnail_url.is_empty() {
        embed = embed.thumbnail(thumbnail_url(&stream.thumbnail_url));
    }

    Ok(embed)
}

/// Builds the full announcement message: mention text plus embed.
pub fn build_announcement(mention: &str, stream: &LiveStream) -> Result<CreateMessage, InternalError> {
    Ok(CreateMessage::new()
        .content(announcement_content(mention, stream))
        .embed(build_live_embed(stream)?))
}

/// Log channel line for a lock channel visibility change, e.g. `Locked <#123>`.
pub fn visibility_audit_line(channel_id: u64, visible: bool) -> String {
    let action = if visible { "Unlocked" } else { "Locked" };
    format!("{} <#{}>", action, channel_id)
}

/// Log channel line for a banner change, naming the image file.
pub fn banner_audit_line(path: &Path) -> String {
    match path.file_name() {
        Some(name) => format!("Changed banner to {}", name.to_string_lossy()),
        None => "Changed banner".to_string(),
    }
}
