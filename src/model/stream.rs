//! Domain models for per-guild stream watching and live-state transitions.

use chrono::{DateTime, Utc};

/// Stream watch configuration for one guild.
///
/// `last_stream_id` is the only durable record of whether the streamer is live for this
/// guild: `Some` means the reconciler announced that stream and has not yet observed it end.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildStreamConfig {
    /// Discord guild ID (stored as String).
    pub guild_id: String,
    /// Twitch login being watched.
    pub streamer_login: String,
    /// Channel receiving the live announcement.
    pub notification_channel_id: String,
    /// Channel hidden from `lock_role_ids` while the stream is live.
    pub lock_channel_id: Option<String>,
    /// Roles whose view permission on the lock channel is toggled.
    pub lock_role_ids: Vec<String>,
    /// Twitch stream ID of the most recently announced session.
    pub last_stream_id: Option<String>,
    /// Channel receiving a line for each lock, unlock and banner change.
    pub log_channel_id: Option<String>,
}

impl GuildStreamConfig {
    /// Converts the settings row and its lock roles at the repository boundary.
    pub fn from_entity(
        entity: entity::stream_settings::Model,
        lock_roles: Vec<entity::stream_lock_role::Model>,
    ) -> Self {
        Self {
            guild_id: entity.guild_id,
            streamer_login: entity.streamer_login,
            notification_channel_id: entity.notification_channel_id,
            lock_channel_id: entity.lock_channel_id,
            lock_role_ids: lock_roles.into_iter().map(|role| role.role_id).collect(),
            last_stream_id: entity.last_stream_id,
            log_channel_id: entity.log_channel_id,
        }
    }
}

/// Parameters for creating or replacing a guild's stream settings.
///
/// Lock roles are managed separately through `set_lock_roles`.
#[derive(Debug, Clone)]
pub struct UpsertStreamSettingsParam {
    pub guild_id: String,
    pub streamer_login: String,
    pub notification_channel_id: String,
    pub lock_channel_id: Option<String>,
    pub log_channel_id: Option<String>,
}

/// A live Twitch stream, carrying what the announcement needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveStream {
    pub stream_id: String,
    pub streamer_login: String,
    pub streamer_display_name: String,
    pub title: String,
    pub game_name: String,
    pub viewer_count: u64,
    /// Preview URL template containing `{width}` and `{height}` placeholders.
    pub thumbnail_url: String,
    pub started_at: DateTime<Utc>,
}

/// Normalized result of a status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveStatus {
    Offline,
    Live(LiveStream),
}

impl LiveStatus {
    pub fn stream_id(&self) -> Option<&str> {
        match self {
            Self::Offline => None,
            Self::Live(stream) => Some(&stream.stream_id),
        }
    }
}

/// Change between the persisted stream id and the freshly observed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTransition {
    /// Same id as persisted (including offline to offline). Nothing to do.
    NoChange,
    /// Offline to live.
    Started(LiveStream),
    /// Live to offline.
    Ended { previous: String },
    /// A different stream replaced the persisted one without an offline reading in between.
    /// Handled as `Ended` followed by `Started` in the same tick.
    Restarted { previous: String, current: LiveStream },
}

/// Discriminant of a `StreamTransition`, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    NoChange,
    Started,
    Ended,
    Restarted,
}

impl StreamTransition {
    /// Classifies the move from `last_stream_id` to `status`.
    pub fn determine(last_stream_id: Option<&str>, status: LiveStatus) -> Self {
        match (last_stream_id, status) {
            (None, LiveStatus::Offline) => Self::NoChange,
            (Some(previous), LiveStatus::Offline) => Self::Ended {
                previous: previous.to_string(),
            },
            (None, LiveStatus::Live(stream)) => Self::Started(stream),
            (Some(previous), LiveStatus::Live(stream)) if previous == stream.stream_id => {
                Self::NoChange
            }
            (Some(previous), LiveStatus::Live(stream)) => Self::Restarted {
                previous: previous.to_string(),
                current: stream,
            },
        }
    }

    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::NoChange => TransitionKind::NoChange,
            Self::Started(_) => TransitionKind::Started,
            Self::Ended { .. } => TransitionKind::Ended,
            Self::Restarted { .. } => TransitionKind::Restarted,
        }
    }

    /// Stream id to persist once the transition's side effects ran.
    pub fn next_stream_id(&self) -> Option<String> {
        match self {
            Self::NoChange | Self::Ended { .. } => None,
            Self::Started(stream) => Some(stream.stream_id.clone()),
            Self::Restarted { current, .. } => Some(current.stream_id.clone()),
        }
    }
}

impl TransitionKind {
    /// Number of start/end events the transition stands for.
    pub fn event_count(self) -> usize {
        match self {
            Self::NoChange => 0,
            Self::Started | Self::Ended => 1,
            Self::Restarted => 2,
        }
    }
}
