//! Periodic view refresh as an explicit cancellable task.
//!
//! Each view owns one poll cycle: an immediate fetch on activation, then one
//! per interval until the handle is stopped. A cycle's fetch gathers every
//! resource the view needs (see [`crate::snapshot`]) and either succeeds as
//! a whole or fails as a whole. State is applied all-or-nothing, so a
//! render never mixes resources from different ticks.
//!
//! Failures are logged and otherwise ignored: the view keeps showing its
//! last-good snapshot until a later tick succeeds. There is no retry or
//! backoff here by design; the cadence IS the retry.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::error::Result;

/// Default refresh cadence of the dashboard view.
pub const DASHBOARD_REFRESH: Duration = Duration::from_secs(3);
/// Default refresh cadence of the control view.
pub const CONTROL_REFRESH: Duration = Duration::from_secs(2);
/// Default refresh cadence of the indicator board view.
pub const BOARD_REFRESH: Duration = Duration::from_secs(5);

/// Poller configuration for one view.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Name used in log lines, e.g. `"dashboard"`.
    pub name: &'static str,
    /// Time between fetch cycles.
    pub interval: Duration,
}

impl PollerConfig {
    pub fn new(name: &'static str, interval: Duration) -> Self {
        Self { name, interval }
    }
}

/// Handle to a running poll task.
///
/// Dropping the handle does NOT stop the task; call [`PollHandle::stop`].
/// The cancellation token doubles as the liveness flag: once cancelled, no
/// further state is applied, including results of a cycle already in
/// flight.
#[derive(Debug)]
pub struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop polling. In-flight work is discarded, never applied.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether [`PollHandle::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the poll task to finish after a stop.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Spawn a poll task for one view.
///
/// `fetch` produces a complete snapshot of the view's resources; `apply`
/// replaces the view state with it. `apply` runs only for cycles whose
/// every fetch succeeded and only while the handle is live.
pub fn spawn<S, F, Fut, A>(config: PollerConfig, fetch: F, mut apply: A) -> PollHandle
where
    S: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<S>> + Send + 'static,
    A: FnMut(S) + Send + 'static,
{
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        debug!(view = config.name, interval = ?config.interval, "Poll task started");

        // First tick fires immediately, giving the activation fetch.
        let mut timer = tokio::time::interval(config.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut consecutive_failures = 0u32;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = timer.tick() => {}
            }

            let result = tokio::select! {
                // Teardown during a cycle drops the in-flight fetch.
                _ = token.cancelled() => break,
                result = fetch() => result,
            };

            // Liveness gate: a result that lands after stop() is discarded.
            if token.is_cancelled() {
                break;
            }

            match result {
                Ok(snapshot) => {
                    consecutive_failures = 0;
                    apply(snapshot);
                }
                Err(e) => {
                    consecutive_failures += 1;
                    if consecutive_failures <= 3 {
                        warn!(
                            view = config.name,
                            error = %e,
                            attempt = consecutive_failures,
                            "Poll cycle failed, keeping previous state"
                        );
                    } else if consecutive_failures == 4 {
                        error!(
                            view = config.name,
                            error = %e,
                            "Poll cycle still failing, will continue trying silently"
                        );
                    }
                }
            }
        }

        debug!(view = config.name, "Poll task stopped");
    });

    PollHandle { cancel, task }
}
