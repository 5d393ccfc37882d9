use serenity::http::Http;
use std::{sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    data::stream_settings::DbSettingsStore,
    error::{twitch::TwitchError, AppError},
    service::{
        announcer::DiscordAnnouncer,
        stream::{ReconcilerSettings, StreamReconciler},
        twitch::{
            credential::{CredentialProvider, OAuthCredentialExchange},
            helix::HelixStreamClient,
            status::StatusChecker,
        },
    },
    util::clock::SystemClock,
};

const DEFAULT_LOG_FILTER: &str = "info,sea_orm=warn,serenity=warn";

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the stream settings tables
/// exist before the first tick.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client shared by the token exchange and Helix lookups.
///
/// Redirects are disabled, which the OAuth2 token exchange requires. Every request is
/// bounded by the per-guild timeout so a silent Twitch endpoint surfaces as a transport
/// error instead of holding the token cache.
pub fn setup_reqwest_client(config: &Config) -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.guild_timeout)
        .connect_timeout(HTTP_CONNECT_TIMEOUT.min(config.guild_timeout))
        .build()
        .map_err(TwitchError::from)?;

    Ok(client)
}

/// Wires the reconciler to the database, Twitch and Discord.
///
/// # Arguments
/// - `config` - Application configuration
/// - `db` - Database connection for the settings store
/// - `http_client` - Shared reqwest client
/// - `discord_http` - HTTP handle of the bot client
///
/// # Returns
/// - `Ok(Arc<StreamReconciler>)` - Reconciler ready for the scheduler
/// - `Err(AppError::TwitchErr)` - A configured Twitch URL is invalid
pub fn build_reconciler(
    config: &Config,
    db: sea_orm::DatabaseConnection,
    http_client: reqwest::Client,
    discord_http: Arc<Http>,
) -> Result<Arc<StreamReconciler>, AppError> {
    let exchange = OAuthCredentialExchange::new(
        config.twitch_client_id.clone(),
        config.twitch_client_secret.clone(),
        config.twitch_token_url.clone(),
        http_client.clone(),
    )?;
    let credentials = Arc::new(CredentialProvider::new(
        Arc::new(exchange),
        Arc::new(SystemClock),
    ));

    let helix = HelixStreamClient::new(
        http_client,
        config.twitch_client_id.clone(),
        &config.twitch_streams_url,
    )?;
    let status = Arc::new(StatusChecker::new(credentials, Arc::new(helix)));

    let announcer = DiscordAnnouncer::new(discord_http, config.announcement_mention.clone());

    let settings = ReconcilerSettings {
        max_concurrency: config.stream_check_concurrency,
        guild_timeout: config.guild_timeout,
        live_banner_path: config.live_banner_path.clone(),
        offline_banner_path: config.offline_banner_path.clone(),
    };

    Ok(Arc::new(StreamReconciler::new(
        Arc::new(DbSettingsStore::new(db)),
        status,
        Arc::new(announcer),
        settings,
    )))
}
