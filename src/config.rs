use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::error::{config::ConfigError, AppError};

const TWITCH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const TWITCH_STREAMS_URL: &str = "https://api.twitch.tv/helix/streams";

const DEFAULT_CHECK_INTERVAL_MS: u64 = 10_000;
const DEFAULT_CHECK_CONCURRENCY: usize = 4;
const DEFAULT_GUILD_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 5_000;
const DEFAULT_LIVE_BANNER_PATH: &str = "./banners/Live.png";
const DEFAULT_OFFLINE_BANNER_PATH: &str = "./banners/notLive.png";
const DEFAULT_ANNOUNCEMENT_MENTION: &str = "@everyone";

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub twitch_client_id: String,
    pub twitch_client_secret: String,
    pub twitch_token_url: String,
    pub twitch_streams_url: String,

    pub stream_check_interval: Duration,
    pub stream_check_concurrency: usize,
    pub guild_timeout: Duration,
    pub shutdown_grace: Duration,

    pub live_banner_path: PathBuf,
    pub offline_banner_path: PathBuf,
    pub announcement_mention: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let required = |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            twitch_client_id: required("TWITCH_CLIENT_ID")?,
            twitch_client_secret: required("TWITCH_CLIENT_SECRET")?,
            twitch_token_url: TWITCH_TOKEN_URL.to_string(),
            twitch_streams_url: TWITCH_STREAMS_URL.to_string(),
            stream_check_interval: Duration::from_millis(positive(
                "STREAM_CHECK_INTERVAL_MS",
                get("STREAM_CHECK_INTERVAL_MS"),
                DEFAULT_CHECK_INTERVAL_MS,
            )?),
            stream_check_concurrency: positive(
                "STREAM_CHECK_CONCURRENCY",
                get("STREAM_CHECK_CONCURRENCY"),
                DEFAULT_CHECK_CONCURRENCY,
            )?,
            guild_timeout: Duration::from_millis(positive(
                "STREAM_CHECK_GUILD_TIMEOUT_MS",
                get("STREAM_CHECK_GUILD_TIMEOUT_MS"),
                DEFAULT_GUILD_TIMEOUT_MS,
            )?),
            shutdown_grace: Duration::from_millis(parse_or(
                "STREAM_CHECK_SHUTDOWN_GRACE_MS",
                get("STREAM_CHECK_SHUTDOWN_GRACE_MS"),
                DEFAULT_SHUTDOWN_GRACE_MS,
            )?),
            live_banner_path: get("LIVE_BANNER_PATH")
                .unwrap_or_else(|| DEFAULT_LIVE_BANNER_PATH.to_string())
                .into(),
            offline_banner_path: get("OFFLINE_BANNER_PATH")
                .unwrap_or_else(|| DEFAULT_OFFLINE_BANNER_PATH.to_string())
                .into(),
            announcement_mention: get("ANNOUNCEMENT_MENTION")
                .unwrap_or_else(|| DEFAULT_ANNOUNCEMENT_MENTION.to_string()),
        })
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

fn positive<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let raw = value.clone();
    let parsed = parse_or(name, value, default)?;

    if parsed <= T::default() {
        return Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw.unwrap_or_default(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(parsed)
}
