//! Ready event handler.
//!
//! Fires once per gateway connection after the initial handshake.

use serenity::all::{ActivityData, Context, Ready};

/// Logs the connection and shows what the bot is doing in its presence.
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!(
        guilds = ready.guilds.len(),
        "{} is connected to Discord",
        ready.user.name
    );

    ctx.set_activity(Some(ActivityData::watching("Twitch")));
}
