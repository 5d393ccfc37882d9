//! Discord bot integration.
//!
//! The gateway connection runs in its own tokio task. The reconciler never talks to the
//! gateway; it shares the client's `Arc<Http>` through the announcer to edit channels,
//! banners and send messages over REST.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability, used to report which guilds have stream settings
//!
//! No privileged intents are needed.

pub mod handler;
pub mod start;
