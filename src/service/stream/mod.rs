//! Live-stream reconciliation.
//!
//! Each tick compares every configured guild's persisted `last_stream_id` with the streamer's
//! current Twitch status and drives the Discord side effects of a genuine transition exactly
//! once, persisting the new state only after the side effects were attempted.
//!
//! # Per-guild sequence
//!
//! 1. Validate the stored settings (skip the guild when ids are malformed)
//! 2. Query the live status (skip the guild on any Twitch failure, state untouched)
//! 3. Classify the transition; `NoChange` ends here without a write
//! 4. Run the side effects in fixed order, logging and continuing past failures
//! 5. Persist the new `last_stream_id`
//!
//! Guilds are processed concurrently up to `max_concurrency`, each under `guild_timeout`.
//! A guild still in flight from an earlier tick is skipped rather than queued, so the
//! read-compare-write sequence for one guild never overlaps with itself.

pub mod effects;
pub mod guard;

#[cfg(test)]
mod test;

use dashmap::DashSet;
use futures_util::{stream, StreamExt};
use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::{
    data::stream_settings::SettingsStore,
    error::reconcile::{ReconcileError, ReconcileStage},
    model::stream::{GuildStreamConfig, StreamTransition, TransitionKind},
    service::{announcer::GuildAnnouncer, twitch::status::StatusChecker},
    util::parse::parse_snowflake,
};

use self::{effects::SideEffects, guard::InFlightGuard};

/// Tuning and asset paths for the reconciler.
#[derive(Debug, Clone)]
pub struct ReconcilerSettings {
    pub max_concurrency: usize,
    pub guild_timeout: Duration,
    pub live_banner_path: PathBuf,
    pub offline_banner_path: PathBuf,
}

/// Parsed Discord ids of a validated guild configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildTargets {
    pub guild_id: u64,
    pub notification_channel_id: u64,
    pub lock_channel_id: Option<u64>,
    pub lock_role_ids: Vec<u64>,
    pub log_channel_id: Option<u64>,
}

/// A guild that could not be reconciled during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildFailure {
    pub guild_id: String,
    pub stage: ReconcileStage,
    pub message: String,
}

/// Aggregated outcome of one tick.
#[derive(Debug, Default, Clone)]
pub struct TickReport {
    /// Guilds whose reconciliation ran to completion, transition or not.
    pub checked: usize,
    /// Start/end events emitted; a restart counts as two.
    pub transitions: usize,
    pub failed: Vec<GuildFailure>,
    /// Guilds still being processed by an earlier tick.
    pub skipped_busy: Vec<String>,
    /// The tick stopped before visiting any guild.
    pub aborted: bool,
}

enum GuildOutcome {
    Completed(TransitionKind),
    Busy,
    Failed(ReconcileError),
}

impl TickReport {
    fn record(&mut self, guild_id: String, outcome: GuildOutcome) {
        match outcome {
            GuildOutcome::Completed(kind) => {
                self.checked += 1;
                self.transitions += kind.event_count();
            }
            GuildOutcome::Busy => self.skipped_busy.push(guild_id),
            GuildOutcome::Failed(e) => self.failed.push(GuildFailure {
                guild_id,
                stage: e.stage(),
                message: e.to_string(),
            }),
        }
    }
}

pub struct StreamReconciler {
    store: Arc<dyn SettingsStore>,
    status: Arc<StatusChecker>,
    announcer: Arc<dyn GuildAnnouncer>,
    settings: ReconcilerSettings,
    in_flight: Arc<DashSet<String>>,
}

impl StreamReconciler {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        status: Arc<StatusChecker>,
        announcer: Arc<dyn GuildAnnouncer>,
        settings: ReconcilerSettings,
    ) -> Self {
        Self {
            store,
            status,
            announcer,
            settings,
            in_flight: Arc::new(DashSet::new()),
        }
    }

    /// Runs one reconciliation pass over every configured guild.
    ///
    /// Never fails: a missing token or unreadable settings abort the tick with a log line,
    /// and per-guild failures are collected into the report. The token check is bounded by
    /// `guild_timeout`; dropping it on expiry releases the token cache for the next tick.
    pub async fn tick(&self) -> TickReport {
        let mut report = TickReport::default();

        let token_timeout = self.settings.guild_timeout;

        match tokio::time::timeout(token_timeout, self.status.ensure_credential()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!("Skipping stream check, no Twitch access token: {}", e);
                report.aborted = true;
                return report;
            }
            Err(_) => {
                tracing::warn!(
                    "Skipping stream check, Twitch token exchange did not finish within {:?}",
                    token_timeout
                );
                report.aborted = true;
                return report;
            }
        }

        let configs = match self.store.list_configs().await {
            Ok(configs) => configs,
            Err(e) => {
                tracing::error!("Skipping stream check, failed to load stream settings: {}", e);
                report.aborted = true;
                return report;
            }
        };

        let outcomes: Vec<(String, GuildOutcome)> = stream::iter(configs)
            .map(|config| async move {
                let outcome = self.run_guild(&config.guild_id).await;
                (config.guild_id, outcome)
            })
            .buffer_unordered(self.settings.max_concurrency.max(1))
            .collect()
            .await;

        for (guild_id, outcome) in outcomes {
            report.record(guild_id, outcome);
        }

        tracing::debug!(
            checked = report.checked,
            transitions = report.transitions,
            failed = report.failed.len(),
            skipped_busy = report.skipped_busy.len(),
            "Stream check finished"
        );

        report
    }

    /// Waits until no guild is in flight, up to `grace`.
    ///
    /// # Returns
    /// - `true` - Every in-flight guild finished
    /// - `false` - The grace period elapsed first
    pub async fn wait_idle(&self, grace: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + grace;

        while !self.in_flight.is_empty() {
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        true
    }

    async fn run_guild(&self, guild_id: &str) -> GuildOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, guild_id) else {
            tracing::debug!(guild_id, "Guild still being checked by an earlier tick, skipping");
            return GuildOutcome::Busy;
        };

        let timeout = self.settings.guild_timeout;

        let result = match tokio::time::timeout(timeout, self.reconcile_fresh(guild_id)).await {
            Ok(result) => result,
            Err(_) => Err(ReconcileError::TimedOut(timeout)),
        };

        match result {
            Ok(kind) => GuildOutcome::Completed(kind),
            Err(e) => {
                match e.stage() {
                    ReconcileStage::Persist => {
                        tracing::error!(guild_id, stage = %e.stage(), "Stream check failed: {}", e)
                    }
                    _ => tracing::warn!(guild_id, stage = %e.stage(), "Stream check failed: {}", e),
                }
                GuildOutcome::Failed(e)
            }
        }
    }

    /// Re-reads the guild's settings under the in-flight guard so the comparison uses the
    /// state written by any tick that finished after this one listed the guilds.
    async fn reconcile_fresh(&self, guild_id: &str) -> Result<TransitionKind, ReconcileError> {
        match self.store.get_config(guild_id).await? {
            Some(config) => self.reconcile_guild(&config).await,
            None => {
                tracing::debug!(guild_id, "Stream settings removed since listing, skipping");
                Ok(TransitionKind::NoChange)
            }
        }
    }

    /// Reconciles one guild against the current live status.
    ///
    /// # Returns
    /// - `Ok(TransitionKind)` - Transition handled (or none needed)
    /// - `Err(ReconcileError::InvalidConfig)` - Settings unusable, nothing queried
    /// - `Err(ReconcileError::Status)` - Live status unknown, state untouched
    /// - `Err(ReconcileError::Persistence)` - Side effects ran but the new state was not saved
    pub async fn reconcile_guild(
        &self,
        config: &GuildStreamConfig,
    ) -> Result<TransitionKind, ReconcileError> {
        let targets = validate_config(config)?;

        let status = self.status.check(&config.streamer_login).await?;
        let transition = StreamTransition::determine(config.last_stream_id.as_deref(), status);

        let effects = SideEffects::new(self.announcer.as_ref(), &self.settings, &targets);

        match &transition {
            StreamTransition::NoChange => return Ok(TransitionKind::NoChange),
            StreamTransition::Started(stream) => {
                tracing::info!(
                    guild_id = %config.guild_id,
                    login = %config.streamer_login,
                    stream_id = %stream.stream_id,
                    "Stream started"
                );
                effects.stream_started(stream).await;
            }
            StreamTransition::Ended { previous } => {
                tracing::info!(
                    guild_id = %config.guild_id,
                    login = %config.streamer_login,
                    stream_id = %previous,
                    "Stream ended"
                );
                effects.stream_ended().await;
            }
            StreamTransition::Restarted { previous, current } => {
                tracing::info!(
                    guild_id = %config.guild_id,
                    login = %config.streamer_login,
                    previous = %previous,
                    stream_id = %current.stream_id,
                    "Stream restarted"
                );
                effects.stream_ended().await;
                effects.stream_started(current).await;
            }
        }

        self.store
            .update_last_stream_id(&config.guild_id, transition.next_stream_id())
            .await?;

        Ok(transition.kind())
    }
}

/// Checks that the settings can be acted on and parses their Discord ids.
pub fn validate_config(config: &GuildStreamConfig) -> Result<GuildTargets, ReconcileError> {
    if config.streamer_login.trim().is_empty() {
        return Err(ReconcileError::InvalidConfig(
            "streamer_login is empty".to_string(),
        ));
    }

    let invalid = |field: &str, e: crate::error::internal::InternalError| {
        ReconcileError::InvalidConfig(format!("{}: {}", field, e))
    };

    let guild_id = parse_snowflake(&config.guild_id).map_err(|e| invalid("guild_id", e))?;
    let notification_channel_id = parse_snowflake(&config.notification_channel_id)
        .map_err(|e| invalid("notification_channel_id", e))?;
    let lock_channel_id = config
        .lock_channel_id
        .as_deref()
        .map(parse_snowflake)
        .transpose()
        .map_err(|e| invalid("lock_channel_id", e))?;
    let lock_role_ids = config
        .lock_role_ids
        .iter()
        .map(|role_id| parse_snowflake(role_id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid("lock_role_ids", e))?;
    let log_channel_id = config
        .log_channel_id
        .as_deref()
        .map(parse_snowflake)
        .transpose()
        .map_err(|e| invalid("log_channel_id", e))?;

    Ok(GuildTargets {
        guild_id,
        notification_channel_id,
        lock_channel_id,
        lock_role_ids,
        log_channel_id,
    })
}
