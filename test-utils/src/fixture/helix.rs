//! Twitch Helix `GET /helix/streams` response bodies.

use serde_json::{json, Value};

/// Default game reported for live fixtures.
pub const DEFAULT_GAME_NAME: &str = "Just Chatting";

/// Default stream title reported for live fixtures.
pub const DEFAULT_TITLE: &str = "Test stream";

/// Default viewer count reported for live fixtures.
pub const DEFAULT_VIEWER_COUNT: u64 = 42;

/// Default `started_at` reported for live fixtures.
pub const DEFAULT_STARTED_AT: &str = "2026-03-01T18:00:00Z";

/// Body returned by Helix when the queried login is offline.
pub fn offline_body() -> Value {
    json!({ "data": [], "pagination": {} })
}

/// Body returned by Helix when `login` is live with stream `stream_id`.
///
/// The display name is the login with its first letter upper-cased.
pub fn live_body(stream_id: &str, login: &str) -> Value {
    let mut display_name = login.to_string();
    if let Some(first) = display_name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    json!({
        "data": [{
            "id": stream_id,
            "user_id": "141981764",
            "user_login": login,
            "user_name": display_name,
            "game_id": "509658",
            "game_name": DEFAULT_GAME_NAME,
            "type": "live",
            "title": DEFAULT_TITLE,
            "tags": ["English"],
            "viewer_count": DEFAULT_VIEWER_COUNT,
            "started_at": DEFAULT_STARTED_AT,
            "language": "en",
            "thumbnail_url": format!(
                "https://static-cdn.jtvnw.net/previews-ttv/live_user_{}-{{width}}x{{height}}.jpg",
                login
            ),
            "is_mature": false
        }],
        "pagination": {}
    })
}
