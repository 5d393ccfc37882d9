//! Helix streams endpoint client.

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::{
    error::twitch::TwitchError,
    model::{
        stream::LiveStatus,
        twitch::{AccessCredential, HelixStreamsResponse},
    },
};

/// Source of live status for a Twitch login.
#[async_trait]
pub trait StreamStatusClient: Send + Sync {
    /// Queries whether `login` is live right now.
    ///
    /// # Returns
    /// - `Ok(LiveStatus)` - Normalized status
    /// - `Err(TwitchError::Unauthorized)` - `credential` was rejected
    /// - `Err(TwitchError)` - Transport, API or decode failure
    async fn get_live_status(
        &self,
        login: &str,
        credential: &AccessCredential,
    ) -> Result<LiveStatus, TwitchError>;
}

/// `StreamStatusClient` calling `GET /helix/streams?user_login=`.
pub struct HelixStreamClient {
    http_client: reqwest::Client,
    client_id: String,
    streams_url: Url,
}

impl HelixStreamClient {
    /// # Returns
    /// - `Err(TwitchError::InvalidUrl)` - `streams_url` is not a valid URL
    pub fn new(
        http_client: reqwest::Client,
        client_id: String,
        streams_url: &str,
    ) -> Result<Self, TwitchError> {
        let streams_url = Url::parse(streams_url)?;

        Ok(Self {
            http_client,
            client_id,
            streams_url,
        })
    }

    fn streams_url_for(&self, login: &str) -> Url {
        let mut url = self.streams_url.clone();
        url.query_pairs_mut().append_pair("user_login", login);
        url
    }
}

#[async_trait]
impl StreamStatusClient for HelixStreamClient {
    async fn get_live_status(
        &self,
        login: &str,
        credential: &AccessCredential,
    ) -> Result<LiveStatus, TwitchError> {
        let response = self
            .http_client
            .get(self.streams_url_for(login))
            .header("Client-ID", &self.client_id)
            .bearer_auth(&credential.token)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(TwitchError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwitchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: HelixStreamsResponse = serde_json::from_str(&body)?;

        Ok(LiveStatus::from(parsed))
    }
}
