use thiserror::Error;

use crate::error::internal::InternalError;

/// Failures delivering a side effect to Discord.
#[derive(Error, Debug)]
pub enum AnnounceError {
    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    Discord(Box<serenity::Error>),

    /// The banner image could not be read from disk.
    #[error("Failed to read banner image '{path}': {source}")]
    BannerImage {
        /// Path that was read
        path: String,
        /// The underlying read error
        #[source]
        source: Box<serenity::Error>,
    },

    /// Announcement data could not be converted for Discord.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<serenity::Error> for AnnounceError {
    fn from(err: serenity::Error) -> Self {
        AnnounceError::Discord(Box::new(err))
    }
}
