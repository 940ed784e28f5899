//! # Job Poller
//!
//! Watches jobs until they reach a terminal status. Each watch is a task
//! that fetches `/v1/jobs/{id}` on a fixed cadence, reports every snapshot
//! to an observer, and stops on `succeeded`/`failed` after notifying the
//! observer exactly once so dependent collections can be refreshed.
//!
//! Invariants:
//! - at most one active watch per job id; re-watching an id supersedes and
//!   cancels the previous watch;
//! - cancellation (handle, supersede, or poller shutdown) stops the loop on
//!   every exit path, and no observer callback fires after it, even for a
//!   fetch already in flight;
//! - ticks are serial: the next fetch starts only after the previous one
//!   resolved, so snapshots are never observed out of order;
//! - transient fetch failures back off with jitter up to a configured number
//!   of consecutive attempts, then one `poll_failed` fires and the watch
//!   halts; permanent failures halt immediately.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use metrics::{counter, histogram};
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

use crate::client::ApiClient;
use crate::config::PollerSettings;
use crate::error::ClientError;
use crate::models::Job;

/// Observer for poll events. All methods default to no-ops so callers can
/// override only what they need.
#[async_trait]
pub trait PollObserver: Send + Sync {
    /// Every fetched snapshot, terminal or not.
    async fn job_updated(&self, _job: &Job) {}

    /// The job reached a terminal status. Fired exactly once per watch,
    /// immediately before the watch stops; refresh dependent collections
    /// here.
    async fn job_finished(&self, _job: &Job) {}

    /// Polling halted on a fetch failure. Fired at most once per watch.
    async fn poll_failed(&self, _job_id: i64, _error: &ClientError) {}
}

/// How a watch ended.
#[derive(Debug)]
pub enum PollOutcome {
    /// The job reached a terminal status.
    Finished(Job),
    /// Polling halted after fetch failures.
    Halted { job_id: i64, error: ClientError },
    /// The watch was cancelled or superseded before completion.
    Cancelled,
}

struct ActiveWatch {
    token: CancellationToken,
    generation: u64,
}

/// Registry of active job watches.
pub struct JobPoller {
    client: Arc<ApiClient>,
    settings: PollerSettings,
    shutdown: CancellationToken,
    generation: AtomicU64,
    active: Arc<Mutex<HashMap<i64, ActiveWatch>>>,
}

/// Handle for one active watch.
pub struct JobWatch {
    job_id: i64,
    token: CancellationToken,
    handle: JoinHandle<PollOutcome>,
}

impl JobWatch {
    pub fn job_id(&self) -> i64 {
        self.job_id
    }

    /// Tear the watch down. Idempotent; safe to call from any task.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Token that cancels this watch, for callers that need to tear it down
    /// while awaiting [`Self::join`].
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait for the watch to end and return how it did.
    pub async fn join(self) -> PollOutcome {
        self.handle.await.unwrap_or(PollOutcome::Cancelled)
    }
}

impl JobPoller {
    pub fn new(client: Arc<ApiClient>, settings: PollerSettings) -> Self {
        Self {
            client,
            settings,
            shutdown: CancellationToken::new(),
            generation: AtomicU64::new(0),
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether a watch for this job id is currently registered.
    pub fn is_watching(&self, job_id: i64) -> bool {
        self.active
            .lock()
            .map(|active| active.contains_key(&job_id))
            .unwrap_or(false)
    }

    /// Cancel every active watch. New watches started afterwards are
    /// cancelled immediately.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Start watching a job. If a watch for the same id is already active it
    /// is cancelled and replaced, so at most one poll loop exists per id.
    #[instrument(skip_all, fields(job_id = job_id))]
    pub fn watch(&self, job_id: i64, observer: Arc<dyn PollObserver>) -> JobWatch {
        let token = self.shutdown.child_token();
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut active) = self.active.lock()
            && let Some(previous) = active.insert(
                job_id,
                ActiveWatch {
                    token: token.clone(),
                    generation,
                },
            )
        {
            debug!(job_id, "Superseding existing watch for job");
            previous.token.cancel();
        }

        let client = self.client.clone();
        let settings = self.settings.clone();
        let registry = self.active.clone();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            // Registry cleanup must run on every exit path, but only for our
            // own entry: a superseding watch may already have replaced it.
            let _registry_entry = scopeguard::guard((), move |_| {
                if let Ok(mut active) = registry.lock()
                    && active
                        .get(&job_id)
                        .is_some_and(|watch| watch.generation == generation)
                {
                    active.remove(&job_id);
                }
            });

            poll_job(&client, &settings, job_id, observer, task_token).await
        });

        JobWatch {
            job_id,
            token,
            handle,
        }
    }
}

async fn poll_job(
    client: &ApiClient,
    settings: &PollerSettings,
    job_id: i64,
    observer: Arc<dyn PollObserver>,
    token: CancellationToken,
) -> PollOutcome {
    let mut ticker = interval(Duration::from_millis(settings.interval_ms));
    // A fetch that overruns the cadence delays the next tick instead of
    // bunching fetches together.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; consume it so every fetch runs
    // one full interval after the previous one, like the cadence promises.
    ticker.tick().await;

    let mut consecutive_failures: u32 = 0;

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!(job_id, "Job watch cancelled");
                return PollOutcome::Cancelled;
            }
            _ = ticker.tick() => {}
        }

        counter!("job_poll_ticks_total").increment(1);
        let fetch_started = std::time::Instant::now();

        // Cancellation must also win against a fetch already in flight, so
        // no snapshot is applied after teardown.
        let fetched = tokio::select! {
            _ = token.cancelled() => {
                debug!(job_id, "Job watch cancelled mid-fetch");
                return PollOutcome::Cancelled;
            }
            result = client.job(job_id) => result,
        };
        histogram!("job_poll_fetch_duration_ms")
            .record(fetch_started.elapsed().as_secs_f64() * 1_000.0);

        match fetched {
            Ok(job) => {
                consecutive_failures = 0;
                observer.job_updated(&job).await;

                if job.is_terminal() {
                    counter!("job_poll_terminal_total").increment(1);
                    debug!(job_id, status = %job.status, "Job reached terminal status");
                    observer.job_finished(&job).await;
                    return PollOutcome::Finished(job);
                }
            }
            Err(err) if err.is_transient()
                && consecutive_failures + 1 < settings.max_fetch_failures =>
            {
                consecutive_failures += 1;
                counter!("job_poll_fetch_failures_total").increment(1);
                let delay = sample_backoff(settings, consecutive_failures);
                warn!(
                    job_id,
                    attempt = consecutive_failures,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Job status fetch failed; backing off"
                );
                tokio::select! {
                    _ = token.cancelled() => return PollOutcome::Cancelled,
                    _ = sleep(delay) => {}
                }
            }
            Err(err) => {
                counter!("job_poll_halted_total").increment(1);
                error!(job_id, error = %err, "Job polling halted");
                observer.poll_failed(job_id, &err).await;
                return PollOutcome::Halted { job_id, error: err };
            }
        }
    }
}

fn sample_backoff(settings: &PollerSettings, attempt: u32) -> Duration {
    let mut rng = rand::thread_rng();
    compute_backoff(settings, attempt, &mut rng)
}

/// Exponential backoff with jitter: `base * 2^(attempt-1)` capped at the
/// configured maximum, then scaled by `1 ± jitter_factor`.
fn compute_backoff<R: Rng + ?Sized>(
    settings: &PollerSettings,
    attempt: u32,
    rng: &mut R,
) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    let raw_ms = settings
        .backoff_base_ms
        .saturating_mul(1u64 << exponent)
        .min(settings.backoff_max_ms);

    let jitter = settings.jitter_factor.clamp(0.0, 1.0);
    let scaled = if jitter > 0.0 {
        let factor = rng.gen_range(1.0 - jitter..=1.0 + jitter);
        (raw_ms as f64 * factor).round() as u64
    } else {
        raw_ms
    };

    Duration::from_millis(scaled.min(settings.backoff_max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn settings() -> PollerSettings {
        PollerSettings {
            interval_ms: 1500,
            max_fetch_failures: 3,
            backoff_base_ms: 2000,
            backoff_max_ms: 30000,
            jitter_factor: 0.1,
        }
    }

    #[test]
    fn backoff_grows_and_caps() {
        let mut config = settings();
        config.jitter_factor = 0.0;

        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        assert_eq!(
            compute_backoff(&config, 1, &mut rng),
            Duration::from_millis(2000)
        );
        assert_eq!(
            compute_backoff(&config, 2, &mut rng),
            Duration::from_millis(4000)
        );
        assert_eq!(
            compute_backoff(&config, 3, &mut rng),
            Duration::from_millis(8000)
        );
        // Far past the cap.
        assert_eq!(
            compute_backoff(&config, 12, &mut rng),
            Duration::from_millis(30000)
        );
    }

    #[test]
    fn backoff_jitter_respects_bounds() {
        let config = settings();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        for attempt in 1..=6 {
            let delay = compute_backoff(&config, attempt, &mut rng).as_millis() as u64;
            assert!(delay <= config.backoff_max_ms);
            let raw = config
                .backoff_base_ms
                .saturating_mul(1u64 << (attempt - 1))
                .min(config.backoff_max_ms);
            let floor = (raw as f64 * (1.0 - config.jitter_factor)).floor() as u64;
            assert!(delay >= floor, "delay {delay} below jitter floor {floor}");
        }
    }
}
