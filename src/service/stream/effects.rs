use std::path::Path;

use crate::{
    model::stream::LiveStream,
    service::{
        announcer::{builder, GuildAnnouncer},
        stream::{GuildTargets, ReconcilerSettings},
    },
};

/// Side effects of one guild's transition, run in fixed order.
///
/// A failing step is logged with the guild id and step name; later steps still run.
/// Successful lock, unlock and banner steps are followed by a line in the guild's log
/// channel when one is configured.
pub struct SideEffects<'a> {
    announcer: &'a dyn GuildAnnouncer,
    settings: &'a ReconcilerSettings,
    targets: &'a GuildTargets,
}

impl<'a> SideEffects<'a> {
    pub fn new(
        announcer: &'a dyn GuildAnnouncer,
        settings: &'a ReconcilerSettings,
        targets: &'a GuildTargets,
    ) -> Self {
        Self {
            announcer,
            settings,
            targets,
        }
    }

    /// Hide the lock channel, switch to the live banner, announce.
    pub async fn stream_started(&self, stream: &LiveStream) {
        self.set_lock_visibility(false).await;

        self.set_banner(&self.settings.live_banner_path).await;

        if let Err(e) = self
            .announcer
            .send_announcement(self.targets.notification_channel_id, stream)
            .await
        {
            tracing::error!(
                guild_id = self.targets.guild_id,
                stage = "announce",
                "Failed to send live announcement: {}",
                e
            );
        }
    }

    /// Restore the lock channel, switch to the offline banner.
    pub async fn stream_ended(&self) {
        self.set_lock_visibility(true).await;

        self.set_banner(&self.settings.offline_banner_path).await;
    }

    async fn set_lock_visibility(&self, visible: bool) {
        let Some(channel_id) = self.targets.lock_channel_id else {
            return;
        };
        if self.targets.lock_role_ids.is_empty() {
            return;
        }

        let stage = if visible { "unlock" } else { "lock" };

        match self
            .announcer
            .set_channel_visibility(channel_id, &self.targets.lock_role_ids, visible)
            .await
        {
            Ok(()) => {
                self.audit(builder::visibility_audit_line(channel_id, visible))
                    .await
            }
            Err(e) => tracing::error!(
                guild_id = self.targets.guild_id,
                stage,
                "Failed to update lock channel visibility: {}",
                e
            ),
        }
    }

    async fn set_banner(&self, path: &Path) {
        match self
            .announcer
            .set_guild_banner(self.targets.guild_id, path)
            .await
        {
            Ok(()) => self.audit(builder::banner_audit_line(path)).await,
            Err(e) => tracing::error!(
                guild_id = self.targets.guild_id,
                stage = "banner",
                "Failed to update guild banner: {}",
                e
            ),
        }
    }

    async fn audit(&self, line: String) {
        let Some(channel_id) = self.targets.log_channel_id else {
            return;
        };

        if let Err(e) = self.announcer.send_audit_log(channel_id, &line).await {
            tracing::warn!(
                guild_id = self.targets.guild_id,
                stage = "audit",
                "Failed to post to log channel: {}",
                e
            );
        }
    }
}
