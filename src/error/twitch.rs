use thiserror::Error;

/// Failures talking to Twitch, either the token endpoint or the Helix API.
#[derive(Error, Debug)]
pub enum TwitchError {
    /// Helix answered 401: the access token is missing, expired or revoked.
    ///
    /// Callers invalidate the token they used and retry once with a fresh one.
    #[error("Twitch rejected the access token")]
    Unauthorized,

    /// The request never produced an HTTP response (DNS, TLS, connect, timeout).
    #[error("Twitch request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Helix answered with a non-success status other than 401.
    #[error("Twitch API returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// The response body did not match the expected Helix shape.
    #[error("Failed to decode Twitch response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client-credentials exchange failed.
    #[error("Failed to obtain Twitch access token: {0}")]
    TokenExchange(String),

    /// A configured Twitch endpoint is not a valid URL.
    #[error("Invalid Twitch endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A freshly exchanged token was also answered with 401.
    #[error("Twitch rejected a freshly issued access token")]
    AuthRejected,
}
