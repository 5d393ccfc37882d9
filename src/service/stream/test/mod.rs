use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sea_orm::DbErr;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::sync::Notify;

use crate::{
    data::stream_settings::SettingsStore,
    error::{
        announce::AnnounceError, internal::InternalError, reconcile::ReconcileStage,
        twitch::TwitchError,
    },
    model::{
        stream::{GuildStreamConfig, LiveStatus, LiveStream},
        twitch::AccessCredential,
    },
    service::{
        announcer::GuildAnnouncer,
        stream::{ReconcilerSettings, StreamReconciler, TickReport},
        twitch::{
            credential::{CredentialExchange, CredentialProvider, IssuedToken},
            helix::StreamStatusClient,
            status::StatusChecker,
        },
    },
    util::clock::SystemClock,
};


const LIVE_BANNER: &str = "banners/Live.png";
const OFFLINE_BANNER: &str = "banners/notLive.png";

/// Everything observable that the reconciler did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Visibility {
        channel_id: u64,
        role_ids: Vec<u64>,
        visible: bool,
    },
    Banner {
        guild_id: u64,
        path: PathBuf,
    },
    Announcement {
        channel_id: u64,
        stream_id: String,
    },
    AuditLog {
        channel_id: u64,
        line: String,
    },
    Write {
        guild_id: String,
        last_stream_id: Option<String>,
    },
}

type Journal = Arc<Mutex<Vec<Event>>>;

fn events(journal: &Journal) -> Vec<Event> {
    journal.lock().unwrap().clone()
}

/// Ids derived from a guild id: channel `{guild}1`, lock channel `{guild}2`, role `{guild}3`,
/// log channel `{guild}4` (unset here, see `with_log_channel`).
fn config(guild_id: &str, login: &str, last_stream_id: Option<&str>) -> GuildStreamConfig {
    GuildStreamConfig {
        guild_id: guild_id.to_string(),
        streamer_login: login.to_string(),
        notification_channel_id: format!("{}1", guild_id),
        lock_channel_id: Some(format!("{}2", guild_id)),
        lock_role_ids: vec![format!("{}3", guild_id)],
        last_stream_id: last_stream_id.map(str::to_string),
        log_channel_id: None,
    }
}

fn with_log_channel(mut config: GuildStreamConfig) -> GuildStreamConfig {
    config.log_channel_id = Some(format!("{}4", config.guild_id));
    config
}

fn id(value: String) -> u64 {
    value.parse().unwrap()
}

fn lock(guild_id: &str, visible: bool) -> Event {
    Event::Visibility {
        channel_id: id(format!("{}2", guild_id)),
        role_ids: vec![id(format!("{}3", guild_id))],
        visible,
    }
}

fn banner(guild_id: &str, path: &str) -> Event {
    Event::Banner {
        guild_id: id(guild_id.to_string()),
        path: PathBuf::from(path),
    }
}

fn announcement(guild_id: &str, stream_id: &str) -> Event {
    Event::Announcement {
        channel_id: id(format!("{}1", guild_id)),
        stream_id: stream_id.to_string(),
    }
}

fn audit(guild_id: &str, line: &str) -> Event {
    Event::AuditLog {
        channel_id: id(format!("{}4", guild_id)),
        line: line.to_string(),
    }
}

fn write(guild_id: &str, last_stream_id: Option<&str>) -> Event {
    Event::Write {
        guild_id: guild_id.to_string(),
        last_stream_id: last_stream_id.map(str::to_string),
    }
}

struct MemoryStore {
    configs: Mutex<BTreeMap<String, GuildStreamConfig>>,
    journal: Journal,
    failing_writes: Mutex<HashSet<String>>,
    fail_list: bool,
}

impl MemoryStore {
    fn last_stream_id(&self, guild_id: &str) -> Option<String> {
        self.configs.lock().unwrap()[guild_id].last_stream_id.clone()
    }

    fn fail_writes_for(&self, guild_id: &str) {
        self.failing_writes
            .lock()
            .unwrap()
            .insert(guild_id.to_string());
    }

    fn restore_writes(&self) {
        self.failing_writes.lock().unwrap().clear();
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn list_configs(&self) -> Result<Vec<GuildStreamConfig>, DbErr> {
        if self.fail_list {
            return Err(DbErr::Custom("database is locked".to_string()));
        }
        Ok(self.configs.lock().unwrap().values().cloned().collect())
    }

    async fn get_config(&self, guild_id: &str) -> Result<Option<GuildStreamConfig>, DbErr> {
        Ok(self.configs.lock().unwrap().get(guild_id).cloned())
    }

    async fn update_last_stream_id(
        &self,
        guild_id: &str,
        last_stream_id: Option<String>,
    ) -> Result<(), DbErr> {
        if self.failing_writes.lock().unwrap().contains(guild_id) {
            return Err(DbErr::Custom("disk I/O error".to_string()));
        }

        let mut configs = self.configs.lock().unwrap();
        let Some(config) = configs.get_mut(guild_id) else {
            return Err(DbErr::RecordNotFound(guild_id.to_string()));
        };
        config.last_stream_id = last_stream_id.clone();

        self.journal.lock().unwrap().push(Event::Write {
            guild_id: guild_id.to_string(),
            last_stream_id,
        });

        Ok(())
    }
}

#[derive(Clone)]
enum Script {
    Offline,
    Live(&'static str),
    ApiError(u16),
    /// Sleeps before answering offline.
    Slow(Duration),
    /// Signals `entered`, then waits for `release` before answering offline.
    Gated,
}

struct ScriptedStatus {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<String>>,
    active: AtomicUsize,
    peak: AtomicUsize,
    entered: Notify,
    release: Notify,
}

impl ScriptedStatus {
    fn new(scripts: &[(&str, Script)]) -> Self {
        Self {
            scripts: Mutex::new(
                scripts
                    .iter()
                    .map(|(login, script)| (login.to_string(), script.clone()))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    fn set(&self, login: &str, script: Script) {
        self.scripts
            .lock()
            .unwrap()
            .insert(login.to_string(), script);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn live_stream(login: &str, stream_id: &str) -> LiveStream {
    LiveStream {
        stream_id: stream_id.to_string(),
        streamer_login: login.to_string(),
        streamer_display_name: login.to_string(),
        title: "Test stream".to_string(),
        game_name: "Just Chatting".to_string(),
        viewer_count: 42,
        thumbnail_url: String::new(),
        started_at: Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap(),
    }
}

#[async_trait]
impl StreamStatusClient for ScriptedStatus {
    async fn get_live_status(
        &self,
        login: &str,
        _credential: &AccessCredential,
    ) -> Result<LiveStatus, TwitchError> {
        self.calls.lock().unwrap().push(login.to_string());
        let script = self
            .scripts
            .lock()
            .unwrap()
            .get(login)
            .cloned()
            .unwrap_or(Script::Offline);

        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(active, Ordering::SeqCst);

        let result = match script {
            Script::Offline => Ok(LiveStatus::Offline),
            Script::Live(stream_id) => Ok(LiveStatus::Live(live_stream(login, stream_id))),
            Script::ApiError(status) => Err(TwitchError::Api {
                status,
                body: "Service Unavailable".to_string(),
            }),
            Script::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(LiveStatus::Offline)
            }
            Script::Gated => {
                self.entered.notify_one();
                self.release.notified().await;
                Ok(LiveStatus::Offline)
            }
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ExchangeMode {
    Succeed,
    Fail,
    /// Never answers, like a token endpoint that accepted the connection and went silent.
    Hang,
}

struct StaticExchange {
    mode: ExchangeMode,
    calls: AtomicUsize,
}

#[async_trait]
impl CredentialExchange for StaticExchange {
    async fn exchange(&self) -> Result<IssuedToken, TwitchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            ExchangeMode::Succeed => Ok(IssuedToken {
                token: "app-token".to_string(),
                expires_in: None,
            }),
            ExchangeMode::Fail => Err(TwitchError::TokenExchange(
                "invalid client secret".to_string(),
            )),
            ExchangeMode::Hang => std::future::pending().await,
        }
    }
}

/// What Discord would show for a guild after the effects applied so far.
///
/// Messages are left out: a repeated announcement is the accepted cost of retrying.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct GuildState {
    /// `(channel, role)` to whether the role may view the channel.
    overwrites: BTreeMap<(u64, u64), bool>,
    /// Current banner per guild.
    banners: BTreeMap<u64, PathBuf>,
}

struct RecordingAnnouncer {
    journal: Journal,
    state: Arc<Mutex<GuildState>>,
    failing_announcement_channels: HashSet<u64>,
    fail_banners: bool,
}

#[async_trait]
impl GuildAnnouncer for RecordingAnnouncer {
    async fn set_channel_visibility(
        &self,
        channel_id: u64,
        role_ids: &[u64],
        visible: bool,
    ) -> Result<(), AnnounceError> {
        self.journal.lock().unwrap().push(Event::Visibility {
            channel_id,
            role_ids: role_ids.to_vec(),
            visible,
        });
        let mut state = self.state.lock().unwrap();
        for role_id in role_ids {
            state.overwrites.insert((channel_id, *role_id), visible);
        }
        Ok(())
    }

    async fn set_guild_banner(
        &self,
        guild_id: u64,
        image_path: &Path,
    ) -> Result<(), AnnounceError> {
        self.journal.lock().unwrap().push(Event::Banner {
            guild_id,
            path: image_path.to_path_buf(),
        });
        if self.fail_banners {
            return Err(AnnounceError::Internal(InternalError::InvalidSnowflake {
                value: "banner".to_string(),
            }));
        }
        self.state
            .lock()
            .unwrap()
            .banners
            .insert(guild_id, image_path.to_path_buf());
        Ok(())
    }

    async fn send_announcement(
        &self,
        channel_id: u64,
        stream: &LiveStream,
    ) -> Result<(), AnnounceError> {
        self.journal.lock().unwrap().push(Event::Announcement {
            channel_id,
            stream_id: stream.stream_id.clone(),
        });
        if self.failing_announcement_channels.contains(&channel_id) {
            return Err(AnnounceError::Internal(InternalError::InvalidDiscordTimestamp {
                timestamp: 0,
                reason: "missing access".to_string(),
            }));
        }
        Ok(())
    }

    async fn send_audit_log(&self, channel_id: u64, line: &str) -> Result<(), AnnounceError> {
        self.journal.lock().unwrap().push(Event::AuditLog {
            channel_id,
            line: line.to_string(),
        });
        if self.failing_announcement_channels.contains(&channel_id) {
            return Err(AnnounceError::Internal(InternalError::InvalidSnowflake {
                value: channel_id.to_string(),
            }));
        }
        Ok(())
    }
}

/// Reconciler wired to in-memory fakes sharing one journal.
struct Harness {
    reconciler: StreamReconciler,
    store: Arc<MemoryStore>,
    status: Arc<ScriptedStatus>,
    exchange: Arc<StaticExchange>,
    journal: Journal,
    state: Arc<Mutex<GuildState>>,
}

impl Harness {
    fn guild_state(&self) -> GuildState {
        self.state.lock().unwrap().clone()
    }
}

struct HarnessBuilder {
    configs: Vec<GuildStreamConfig>,
    scripts: Vec<(&'static str, Script)>,
    settings: ReconcilerSettings,
    failing_announcement_channels: HashSet<u64>,
    fail_banners: bool,
    exchange: ExchangeMode,
    fail_list: bool,
}

impl HarnessBuilder {
    fn new() -> Self {
        Self {
            configs: Vec::new(),
            scripts: Vec::new(),
            settings: ReconcilerSettings {
                max_concurrency: 4,
                guild_timeout: Duration::from_secs(5),
                live_banner_path: PathBuf::from(LIVE_BANNER),
                offline_banner_path: PathBuf::from(OFFLINE_BANNER),
            },
            failing_announcement_channels: HashSet::new(),
            fail_banners: false,
            exchange: ExchangeMode::Succeed,
            fail_list: false,
        }
    }

    fn guild(mut self, config: GuildStreamConfig) -> Self {
        self.configs.push(config);
        self
    }

    fn status(mut self, login: &'static str, script: Script) -> Self {
        self.scripts.push((login, script));
        self
    }

    fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.settings.max_concurrency = max_concurrency;
        self
    }

    fn guild_timeout(mut self, guild_timeout: Duration) -> Self {
        self.settings.guild_timeout = guild_timeout;
        self
    }

    fn failing_announcements_in(mut self, channel_id: u64) -> Self {
        self.failing_announcement_channels.insert(channel_id);
        self
    }

    fn failing_banners(mut self) -> Self {
        self.fail_banners = true;
        self
    }

    fn failing_exchange(mut self) -> Self {
        self.exchange = ExchangeMode::Fail;
        self
    }

    fn hanging_exchange(mut self) -> Self {
        self.exchange = ExchangeMode::Hang;
        self
    }

    fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    fn build(self) -> Harness {
        let journal: Journal = Arc::new(Mutex::new(Vec::new()));

        let store = Arc::new(MemoryStore {
            configs: Mutex::new(
                self.configs
                    .into_iter()
                    .map(|config| (config.guild_id.clone(), config))
                    .collect(),
            ),
            journal: journal.clone(),
            failing_writes: Mutex::new(HashSet::new()),
            fail_list: self.fail_list,
        });
        let status = Arc::new(ScriptedStatus::new(&self.scripts));
        let state = Arc::new(Mutex::new(GuildState::default()));
        let announcer = Arc::new(RecordingAnnouncer {
            journal: journal.clone(),
            state: state.clone(),
            failing_announcement_channels: self.failing_announcement_channels,
            fail_banners: self.fail_banners,
        });

        let exchange = Arc::new(StaticExchange {
            mode: self.exchange,
            calls: AtomicUsize::new(0),
        });
        let credentials = Arc::new(CredentialProvider::new(
            exchange.clone(),
            Arc::new(SystemClock),
        ));
        let checker = Arc::new(StatusChecker::new(credentials, status.clone()));

        let reconciler = StreamReconciler::new(store.clone(), checker, announcer, self.settings);

        Harness {
            reconciler,
            store,
            status,
            exchange,
            journal,
            state,
        }
    }
}

fn failed_stages(report: &TickReport) -> Vec<(String, ReconcileStage)> {
    let mut stages: Vec<_> = report
        .failed
        .iter()
        .map(|failure| (failure.guild_id.clone(), failure.stage))
        .collect();
    stages.sort_by(|a, b| a.0.cmp(&b.0));
    stages
}
