mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod util;

use crate::{config::Config, error::AppError, scheduler::stream_check};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client(&config)?;

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) = bot::start::init_bot(&config, db.clone()).await?;
    let shard_manager = bot_client.shard_manager.clone();

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let reconciler = startup::build_reconciler(&config, db, http_client, discord_http)?;

    let mut scheduler =
        stream_check::start_scheduler(reconciler.clone(), config.stream_check_interval).await?;

    tokio::signal::ctrl_c().await.map_err(|e| {
        AppError::InternalError(format!("Failed to listen for shutdown signal: {}", e))
    })?;

    tracing::info!("Shutting down");

    if let Err(e) = scheduler.shutdown().await {
        tracing::error!("Failed to stop stream check scheduler: {}", e);
    }

    if !reconciler.wait_idle(config.shutdown_grace).await {
        tracing::warn!(
            grace_ms = config.shutdown_grace.as_millis() as u64,
            "Stream checks still running after grace period, abandoning them"
        );
    }

    shard_manager.shutdown_all().await;

    Ok(())
}
