//! App access token acquisition and caching.
//!
//! Every guild check shares one `CredentialProvider`. The cached token sits behind an async
//! mutex that is held across the exchange, so concurrent callers that find the cache empty
//! wait for a single exchange instead of each starting their own.

use async_trait::async_trait;
use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    AuthType, Client, ClientId, ClientSecret, EmptyExtraTokenFields, EndpointNotSet, EndpointSet,
    RevocationErrorResponseType, StandardErrorResponse, StandardRevocableToken,
    StandardTokenIntrospectionResponse, StandardTokenResponse, TokenResponse, TokenUrl,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

use crate::{error::twitch::TwitchError, model::twitch::AccessCredential, util::clock::Clock};

/// OAuth2 client with only the token endpoint configured.
pub(crate) type TwitchOAuthClient = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Token returned by an exchange, before it is stamped with an expiry.
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: Option<Duration>,
}

/// Performs one client-credentials exchange.
#[async_trait]
pub trait CredentialExchange: Send + Sync {
    async fn exchange(&self) -> Result<IssuedToken, TwitchError>;
}

/// Client-credentials exchange against the Twitch token endpoint.
pub struct OAuthCredentialExchange {
    oauth_client: TwitchOAuthClient,
    http_client: reqwest::Client,
}

impl OAuthCredentialExchange {
    /// Builds the exchange for the given application credentials.
    ///
    /// Twitch expects `client_id` and `client_secret` in the form body rather than in a
    /// basic auth header.
    ///
    /// # Arguments
    /// - `client_id` - Twitch application client ID
    /// - `client_secret` - Twitch application client secret
    /// - `token_url` - Token endpoint URL
    /// - `http_client` - Shared reqwest client (redirects disabled)
    ///
    /// # Returns
    /// - `Ok(OAuthCredentialExchange)` - Ready to exchange
    /// - `Err(TwitchError::InvalidUrl)` - `token_url` is not a valid URL
    pub fn new(
        client_id: String,
        client_secret: String,
        token_url: String,
        http_client: reqwest::Client,
    ) -> Result<Self, TwitchError> {
        let token_url = TokenUrl::new(token_url)?;

        let oauth_client = oauth2::basic::BasicClient::new(ClientId::new(client_id))
            .set_client_secret(ClientSecret::new(client_secret))
            .set_token_uri(token_url)
            .set_auth_type(AuthType::RequestBody);

        Ok(Self {
            oauth_client,
            http_client,
        })
    }
}

#[async_trait]
impl CredentialExchange for OAuthCredentialExchange {
    async fn exchange(&self) -> Result<IssuedToken, TwitchError> {
        let response = self
            .oauth_client
            .exchange_client_credentials()
            .request_async(&self.http_client)
            .await
            .map_err(|e| TwitchError::TokenExchange(e.to_string()))?;

        Ok(IssuedToken {
            token: response.access_token().secret().clone(),
            expires_in: response.expires_in(),
        })
    }
}

/// Process-wide cache of the app access token.
pub struct CredentialProvider {
    exchange: Arc<dyn CredentialExchange>,
    clock: Arc<dyn Clock>,
    cached: Mutex<Option<AccessCredential>>,
}

impl CredentialProvider {
    pub fn new(exchange: Arc<dyn CredentialExchange>, clock: Arc<dyn Clock>) -> Self {
        Self {
            exchange,
            clock,
            cached: Mutex::new(None),
        }
    }

    /// Returns a usable token, exchanging for a new one when none is cached or the cached
    /// one has expired.
    ///
    /// # Returns
    /// - `Ok(AccessCredential)` - Cached or freshly issued token
    /// - `Err(TwitchError::TokenExchange)` - The exchange failed; the cache stays empty
    pub async fn ensure_valid(&self) -> Result<AccessCredential, TwitchError> {
        let mut cached = self.cached.lock().await;

        if let Some(credential) = cached.as_ref() {
            if !credential.is_expired(self.clock.now()) {
                return Ok(credential.clone());
            }
            tracing::debug!("Twitch access token expired, refreshing");
        }

        let issued = self.exchange.exchange().await?;
        let credential = AccessCredential::issued(issued.token, issued.expires_in, self.clock.now());

        tracing::info!(
            expires_at = ?credential.expires_at,
            "Obtained Twitch app access token"
        );

        *cached = Some(credential.clone());

        Ok(credential)
    }

    /// Drops the cached token if it is still `stale_token`.
    ///
    /// A caller that saw a 401 passes the token it used. If another caller already replaced
    /// it, the fresh token is kept and no second exchange happens.
    pub async fn invalidate(&self, stale_token: &str) {
        let mut cached = self.cached.lock().await;

        if cached
            .as_ref()
            .is_some_and(|credential| credential.token == stale_token)
        {
            *cached = None;
        }
    }
}
