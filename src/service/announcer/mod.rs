//! Discord side effects of a stream transition.
//!
//! The reconciler talks to Discord only through `GuildAnnouncer`: hiding or showing a
//! channel for a set of roles, swapping the guild banner, and posting the live announcement.
//! Every operation is an absolute write, so repeating it after a partial failure leaves the
//! guild in the same state.

pub mod builder;

use async_trait::async_trait;
use serenity::{
    all::{
        ChannelId, CreateAttachment, CreateMessage, EditGuild, GuildId, PermissionOverwrite,
        PermissionOverwriteType, Permissions, RoleId,
    },
    http::Http,
};
use std::{path::Path, sync::Arc};

use crate::{error::announce::AnnounceError, model::stream::LiveStream};

#[async_trait]
pub trait GuildAnnouncer: Send + Sync {
    /// Allows (`visible`) or denies view access to `channel_id` for each role.
    async fn set_channel_visibility(
        &self,
        channel_id: u64,
        role_ids: &[u64],
        visible: bool,
    ) -> Result<(), AnnounceError>;

    /// Replaces the guild banner with the image at `image_path`.
    async fn set_guild_banner(&self, guild_id: u64, image_path: &Path)
        -> Result<(), AnnounceError>;

    /// Posts the live announcement for `stream` in `channel_id`.
    async fn send_announcement(
        &self,
        channel_id: u64,
        stream: &LiveStream,
    ) -> Result<(), AnnounceError>;

    /// Posts a plain text line to the guild's log channel.
    async fn send_audit_log(&self, channel_id: u64, line: &str) -> Result<(), AnnounceError>;
}

/// `GuildAnnouncer` backed by the bot's Serenity HTTP client.
pub struct DiscordAnnouncer {
    http: Arc<Http>,
    /// Mention prefixed to announcements, e.g. `@everyone`.
    mention: String,
}

impl DiscordAnnouncer {
    pub fn new(http: Arc<Http>, mention: String) -> Self {
        Self { http, mention }
    }
}

#[async_trait]
impl GuildAnnouncer for DiscordAnnouncer {
    /// Writes one role overwrite per role. All roles are attempted; the first failure is
    /// returned after the rest were tried.
    async fn set_channel_visibility(
        &self,
        channel_id: u64,
        role_ids: &[u64],
        visible: bool,
    ) -> Result<(), AnnounceError> {
        let channel_id = ChannelId::new(channel_id);
        let (allow, deny) = if visible {
            (Permissions::VIEW_CHANNEL, Permissions::empty())
        } else {
            (Permissions::empty(), Permissions::VIEW_CHANNEL)
        };

        let mut first_error = None;

        for role_id in role_ids {
            let overwrite = PermissionOverwrite {
                allow,
                deny,
                kind: PermissionOverwriteType::Role(RoleId::new(*role_id)),
            };

            if let Err(e) = channel_id.create_permission(&self.http, overwrite).await {
                tracing::warn!(
                    "Failed to update view permission of role {} on channel {}: {}",
                    role_id,
                    channel_id,
                    e
                );
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    async fn set_guild_banner(
        &self,
        guild_id: u64,
        image_path: &Path,
    ) -> Result<(), AnnounceError> {
        let banner = load_banner(image_path).await?;

        GuildId::new(guild_id)
            .edit(&self.http, EditGuild::new().banner(Some(banner)))
            .await?;

        Ok(())
    }

    async fn send_announcement(
        &self,
        channel_id: u64,
        stream: &LiveStream,
    ) -> Result<(), AnnounceError> {
        let message = builder::build_announcement(&self.mention, stream)?;

        ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await?;

        Ok(())
    }

    async fn send_audit_log(&self, channel_id: u64, line: &str) -> Result<(), AnnounceError> {
        ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().content(line))
            .await?;

        Ok(())
    }
}

/// Reads a banner image into the base64 data URI Discord expects for `banner`.
///
/// # Returns
/// - `Ok(String)` - `data:image/...;base64,...` payload
/// - `Err(AnnounceError::BannerImage)` - The file could not be read
pub async fn load_banner(image_path: &Path) -> Result<String, AnnounceError> {
    let attachment = CreateAttachment::path(image_path)
        .await
        .map_err(|e| AnnounceError::BannerImage {
            path: image_path.display().to_string(),
            source: Box::new(e),
        })?;

    Ok(attachment.to_base64())
}
