use std::{sync::Arc, time::Duration};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::stream::StreamReconciler};

/// Starts the stream check scheduler
///
/// Runs one reconciliation tick every `interval`. A tick that outlives the interval does
/// not delay the next one; guilds it still holds are skipped by the overlapping tick.
///
/// # Arguments
/// - `reconciler`: Shared reconciler
/// - `interval`: Time between tick starts
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler, kept so it can be shut down
/// - `Err(AppError::SchedulerErr)` - Job creation or scheduler start failed
pub async fn start_scheduler(
    reconciler: Arc<StreamReconciler>,
    interval: Duration,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let reconciler = reconciler.clone();

        Box::pin(async move {
            run_stream_check(&reconciler).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        interval_ms = interval.as_millis() as u64,
        "Stream check scheduler started"
    );

    Ok(scheduler)
}

/// Runs one tick and summarizes it. Per-guild failures are logged by the reconciler.
async fn run_stream_check(reconciler: &StreamReconciler) {
    let report = reconciler.tick().await;

    if report.aborted {
        return;
    }

    if !report.skipped_busy.is_empty() {
        tracing::warn!(
            guilds = ?report.skipped_busy,
            "Previous stream check still running, guilds skipped"
        );
    }

    if report.transitions > 0 || !report.failed.is_empty() {
        tracing::info!(
            checked = report.checked,
            transitions = report.transitions,
            failed = report.failed.len(),
            "Stream check completed"
        );
    }
}
