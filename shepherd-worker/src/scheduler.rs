//! Interval scheduling of the periodic jobs.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use shepherd_app::AppState;
use shepherd_core::types::JobKind;
use tokio::time::{interval, MissedTickBehavior};

/// Run each scheduled job on its own interval until `shutdown` resolves.
///
/// The first run of every job starts immediately. A job never overlaps with
/// itself; a tick that arrives while the previous run is still going is skipped.
pub async fn run<S>(state: &AppState, jobs: &[(JobKind, Duration)], shutdown: S)
where
    S: Future<Output = ()>,
{
    let loops = jobs
        .iter()
        .map(|(job, every)| run_every(state, *job, *every));

    tokio::select! {
        _ = join_all(loops) => {}
        () = shutdown => tracing::info!("Shutdown requested, stopping scheduler"),
    }
}

async fn run_every(state: &AppState, job: JobKind, every: Duration) {
    tracing::info!("Scheduling {job} every {}s", every.as_secs());
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if let Err(e) = state.run_job(job).await {
            tracing::error!("Scheduled run of {job} failed: {e}");
        }
    }
}
