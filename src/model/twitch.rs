//! Twitch Helix wire types and the app access credential.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::{fmt, time::Duration};

use crate::model::stream::{LiveStatus, LiveStream};

/// Seconds subtracted from the reported lifetime so a token is refreshed before Twitch
/// starts rejecting it.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Upper bound on a reported lifetime. Twitch app tokens live about 60 days.
const MAX_LIFETIME_SECS: u64 = 90 * 24 * 60 * 60;

/// Body of `GET /helix/streams`. An empty `data` array means the login is offline.
#[derive(Debug, Clone, Deserialize)]
pub struct HelixStreamsResponse {
    pub data: Vec<HelixStream>,
}

/// One live stream as reported by Helix.
#[derive(Debug, Clone, Deserialize)]
pub struct HelixStream {
    pub id: String,
    pub user_login: String,
    pub user_name: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub viewer_count: u64,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnail_url: String,
}

impl From<HelixStreamsResponse> for LiveStatus {
    fn from(response: HelixStreamsResponse) -> Self {
        match response.data.into_iter().next() {
            // Helix reports an empty id for a stream that is still being set up
            Some(stream) if !stream.id.is_empty() => LiveStatus::Live(LiveStream {
                stream_id: stream.id,
                streamer_login: stream.user_login,
                streamer_display_name: stream.user_name,
                title: stream.title,
                game_name: stream.game_name,
                viewer_count: stream.viewer_count,
                thumbnail_url: stream.thumbnail_url,
                started_at: stream.started_at,
            }),
            _ => LiveStatus::Offline,
        }
    }
}

/// App access token obtained through the client-credentials flow.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessCredential {
    pub token: String,
    /// Approximate expiry; `None` when Twitch did not report a lifetime.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessCredential {
    /// Builds a credential issued at `now` that lives for `expires_in`.
    pub fn issued(token: String, expires_in: Option<Duration>, now: DateTime<Utc>) -> Self {
        let expires_at = expires_in.and_then(|lifetime| {
            let secs = lifetime.as_secs().min(MAX_LIFETIME_SECS) as i64;
            now.checked_add_signed(chrono::Duration::seconds((secs - EXPIRY_MARGIN_SECS).max(0)))
        });

        Self { token, expires_at }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

impl fmt::Debug for AccessCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessCredential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
