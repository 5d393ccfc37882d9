use std::sync::Arc;

use crate::{
    error::twitch::TwitchError,
    model::stream::LiveStatus,
    service::twitch::{credential::CredentialProvider, helix::StreamStatusClient},
};

/// Live-status lookups with token handling.
///
/// A 401 invalidates the token that was used, obtains a fresh one and retries exactly once.
/// A second 401 is reported as `TwitchError::AuthRejected`.
pub struct StatusChecker {
    credentials: Arc<CredentialProvider>,
    client: Arc<dyn StreamStatusClient>,
}

impl StatusChecker {
    pub fn new(credentials: Arc<CredentialProvider>, client: Arc<dyn StreamStatusClient>) -> Self {
        Self {
            credentials,
            client,
        }
    }

    /// Makes sure a token is available before a tick starts fanning out.
    pub async fn ensure_credential(&self) -> Result<(), TwitchError> {
        self.credentials.ensure_valid().await.map(|_| ())
    }

    pub async fn check(&self, login: &str) -> Result<LiveStatus, TwitchError> {
        let credential = self.credentials.ensure_valid().await?;

        match self.client.get_live_status(login, &credential).await {
            Err(TwitchError::Unauthorized) => {
                tracing::warn!(login, "Twitch rejected access token, refreshing");

                self.credentials.invalidate(&credential.token).await;
                let refreshed = self.credentials.ensure_valid().await?;

                match self.client.get_live_status(login, &refreshed).await {
                    Err(TwitchError::Unauthorized) => Err(TwitchError::AuthRejected),
                    result => result,
                }
            }
            result => result,
        }
    }
}
