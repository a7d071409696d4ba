//! Schedule orchestrator: the declarative, idempotent re-sync of the
//! daily reminder set.
//!
//! A run is a strictly sequential pipeline: permission gate, cancel-all,
//! then one submission per anchor. Individual submission failures are
//! recorded and don't abort the batch; the five-fixed/four-jittered set
//! is independently useful even if one slot fails. The engine holds no
//! copy of the host's schedule between runs and provides no internal
//! mutual exclusion, so callers serialize runs externally.

use std::sync::Arc;

use nudge_core::{
    jitter, Config, DeliveryStyle, MessagePool, ReminderJob, Trigger, FIXED_ANCHORS,
    RANDOM_ANCHORS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::host::NotificationHost;
use crate::permission::PermissionGate;

/// Title shown on the fixed daily slots.
pub const DAILY_TITLE: &str = "Daily check-in";
/// Title shown on the jittered surprise slots.
pub const RANDOM_TITLE: &str = "Surprise check-in";

/// Outcome of one job submission within a run.
#[derive(Debug, Clone)]
pub struct SubmitResult {
    pub identifier: String,
    pub success: bool,
    pub error: Option<String>,
}

/// Outcome of one orchestration run.
#[derive(Debug, Clone)]
pub struct ScheduleReport {
    /// Whether the run got past the permission gate. Per-job failures do
    /// not clear this flag; it means "the run was attempted with
    /// permission", not "every job landed".
    pub ran: bool,
    /// One entry per attempted submission, in submission order.
    pub results: Vec<SubmitResult>,
}

impl ScheduleReport {
    /// Report for a run stopped at the gate: nothing was touched.
    fn skipped() -> Self {
        Self {
            ran: false,
            results: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Owns one scheduling pipeline: gate, message pool, and jitter settings.
pub struct ReminderScheduler {
    host: Arc<dyn NotificationHost>,
    gate: PermissionGate,
    pool: MessagePool,
    max_jitter_minutes: i32,
}

impl ReminderScheduler {
    pub fn new(host: Arc<dyn NotificationHost>, config: &Config) -> Self {
        Self {
            host,
            gate: PermissionGate::new(config.channel_spec(), config.simulated),
            pool: MessagePool::default(),
            max_jitter_minutes: config.max_jitter_minutes,
        }
    }

    /// Swap in a custom message corpus.
    pub fn with_pool(mut self, pool: MessagePool) -> Self {
        self.pool = pool;
        self
    }

    /// Build the full nine-job set for one run.
    ///
    /// Pure except for the injected RNG: bodies are drawn from the pool
    /// and jitter offsets resolved here, once per run, before anything
    /// is awaited. A job's body never changes between scheduling and
    /// firing.
    pub fn build_jobs<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ReminderJob> {
        let channel = &self.gate.channel().name;
        let mut jobs = Vec::with_capacity(FIXED_ANCHORS.len() + RANDOM_ANCHORS.len());

        for anchor in FIXED_ANCHORS {
            jobs.push(ReminderJob {
                identifier: format!("daily_{}", anchor.name),
                title: DAILY_TITLE.to_string(),
                body: self.pool.pick_with(rng).to_string(),
                trigger: Trigger::daily(anchor.hour, anchor.minute),
                delivery: DeliveryStyle::standard(channel),
            });
        }

        for anchor in RANDOM_ANCHORS {
            let slot = jitter(anchor, self.max_jitter_minutes, rng);
            jobs.push(ReminderJob {
                identifier: format!("random_{}", anchor.name),
                title: RANDOM_TITLE.to_string(),
                body: self.pool.pick_with(rng).to_string(),
                trigger: Trigger::daily(slot.hour, slot.minute),
                delivery: DeliveryStyle::standard(channel),
            });
        }

        jobs
    }

    /// Replace the host's entire schedule with a fresh job set.
    ///
    /// If the gate fails, no jobs are touched and the report carries
    /// `ran = false`. Otherwise all previously scheduled jobs are
    /// cancelled and the nine catalog jobs submitted sequentially, one
    /// failure never blocking the rest.
    pub async fn schedule_all<R: Rng + Send + ?Sized>(&self, rng: &mut R) -> ScheduleReport {
        if !self.gate.ensure_ready(self.host.as_ref()).await {
            info!(host = self.host.host_name(), "not ready, skipping schedule run");
            return ScheduleReport::skipped();
        }

        if let Err(e) = self.host.cancel_all().await {
            warn!(error = %e, "cancel-all failed, stale jobs may survive this run");
        }

        let jobs = self.build_jobs(rng);
        let mut results = Vec::with_capacity(jobs.len());

        for job in &jobs {
            let result = self.host.schedule(job).await;
            let (success, error) = match result {
                Ok(()) => {
                    info!(
                        identifier = %job.identifier,
                        hour = job.trigger.hour,
                        minute = job.trigger.minute,
                        "scheduled reminder"
                    );
                    (true, None)
                }
                Err(e) => {
                    warn!(
                        identifier = %job.identifier,
                        error = %e,
                        "reminder submission failed"
                    );
                    (false, Some(e.to_string()))
                }
            };
            results.push(SubmitResult {
                identifier: job.identifier.clone(),
                success,
                error,
            });
        }

        ScheduleReport { ran: true, results }
    }

    /// [`schedule_all`](Self::schedule_all) with a freshly seeded RNG.
    pub async fn schedule_all_default(&self) -> ScheduleReport {
        let mut rng = StdRng::from_entropy();
        self.schedule_all(&mut rng).await
    }
}

/// Fire-and-forget one-shot notification, outside the orchestrator's
/// identifier space. Failure is logged, never propagated.
///
/// Known limitation: a pending immediate notification that has not fired
/// yet is swept away by the next run's cancel-all.
pub async fn send_now(host: &dyn NotificationHost, title: &str, body: &str) {
    match host.send_immediate(title, body).await {
        Ok(()) => info!(title, "immediate notification sent"),
        Err(e) => warn!(title, error = %e, "immediate notification failed"),
    }
}
