use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration as ChronoDuration;
use chrono::NaiveTime;
use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::reconcile::ports::CounterReconciler;

/// Background job running the full published-count reconciliation once a
/// day at 00:00 UTC.
///
/// Owned by process startup: `start` spawns the task, `shutdown` stops it
/// deterministically. The daily pass is the correctness backstop for
/// drift the synchronous path does not cover (book deletion, failed
/// post-create reconciliation).
pub struct ReconcileScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ReconcileScheduler {
    pub fn start<CR>(reconciler: Arc<CR>) -> Self
    where
        CR: CounterReconciler,
    {
        let (shutdown, mut rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            loop {
                let wait = duration_until_next_midnight(Utc::now());
                tracing::info!(
                    seconds_until_run = wait.as_secs(),
                    "Scheduled next published-count reconciliation"
                );

                tokio::select! {
                    _ = rx.changed() => {
                        tracing::info!("Reconcile scheduler stopping");
                        break;
                    }
                    _ = tokio::time::sleep(wait) => {
                        tracing::info!("Running scheduled published-count reconciliation");
                        match reconciler.reconcile_all().await {
                            Ok(summary) => tracing::info!(
                                reconciled = summary.reconciled,
                                failed = summary.failed,
                                "Scheduled reconciliation finished"
                            ),
                            Err(e) => tracing::error!(
                                error = %e,
                                "Scheduled reconciliation failed"
                            ),
                        }
                    }
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Stop the scheduler and wait for the task to exit.
    pub async fn shutdown(self) {
        // Send failure means the task already exited; joining covers both.
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

/// Time left until the next 00:00 UTC, measured from `now`.
fn duration_until_next_midnight(now: DateTime<Utc>) -> std::time::Duration {
    let next_midnight = (now + ChronoDuration::days(1))
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc();

    (next_midnight - now)
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}
