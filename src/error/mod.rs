//! Error types for the stream reconciler.
//!
//! `AppError` is the top-level type returned from startup and the entry point. It wraps the
//! domain errors raised by the Twitch client, the Discord announcer, and the reconciliation
//! loop. Per-guild failures never surface as `AppError`: they are reported as
//! `ReconcileError` inside a tick report and logged where they happen.

pub mod announce;
pub mod config;
pub mod internal;
pub mod reconcile;
pub mod twitch;

use thiserror::Error;

use crate::error::{config::ConfigError, twitch::TwitchError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Twitch client construction or token exchange error.
    #[error(transparent)]
    TwitchErr(#[from] TwitchError),

    /// Internal error with custom message.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
