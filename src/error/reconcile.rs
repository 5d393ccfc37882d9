use std::{fmt, time::Duration};
use thiserror::Error;

use crate::error::twitch::TwitchError;

/// Reasons a single guild could not be reconciled during a tick.
///
/// None of these abort the tick; the guild is skipped and retried on the next one.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Stored settings are incomplete or hold malformed ids.
    #[error("Invalid stream settings: {0}")]
    InvalidConfig(String),

    /// Live status could not be determined. Persisted state is left untouched.
    #[error(transparent)]
    Status(#[from] TwitchError),

    /// Reading or writing the persisted state failed.
    ///
    /// When the write fails after side effects ran, the next tick repeats them.
    #[error(transparent)]
    Persistence(#[from] sea_orm::DbErr),

    /// The guild did not finish within the per-guild time limit.
    #[error("Guild check timed out after {0:?}")]
    TimedOut(Duration),
}

/// Step of the per-guild sequence an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStage {
    Config,
    Status,
    Persist,
    Timeout,
}

impl ReconcileError {
    pub fn stage(&self) -> ReconcileStage {
        match self {
            Self::InvalidConfig(_) => ReconcileStage::Config,
            Self::Status(_) => ReconcileStage::Status,
            Self::Persistence(_) => ReconcileStage::Persist,
            Self::TimedOut(_) => ReconcileStage::Timeout,
        }
    }
}

impl fmt::Display for ReconcileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Config => "config",
            Self::Status => "status",
            Self::Persist => "persist",
            Self::Timeout => "timeout",
        };
        f.write_str(stage)
    }
}
