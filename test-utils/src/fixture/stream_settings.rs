//! Stream settings fixtures for creating in-memory entity models.

use chrono::{TimeZone, Utc};
use entity::stream_settings;

/// Default guild ID for stream settings fixtures.
pub const DEFAULT_GUILD_ID: &str = "987654321";

/// Default watched Twitch login.
pub const DEFAULT_STREAMER_LOGIN: &str = "test_streamer";

/// Default announcement channel ID.
pub const DEFAULT_NOTIFICATION_CHANNEL_ID: &str = "123456789";

/// Creates a stream settings entity model with default values and no live stream.
///
/// # Example
///
/// ```rust,ignore
/// let settings = fixture::stream_settings::entity();
/// assert!(settings.last_stream_id.is_none());
/// ```
pub fn entity() -> stream_settings::Model {
    let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

    stream_settings::Model {
        guild_id: DEFAULT_GUILD_ID.to_string(),
        streamer_login: DEFAULT_STREAMER_LOGIN.to_string(),
        notification_channel_id: DEFAULT_NOTIFICATION_CHANNEL_ID.to_string(),
        lock_channel_id: None,
        last_stream_id: None,
        log_channel_id: None,
        created_at,
        updated_at: created_at,
    }
}
