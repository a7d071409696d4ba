//! In-process host: stores jobs locally and fires them itself.
//!
//! Useful when the engine runs as a resident desktop worker rather than
//! against a device gateway. A minute-granularity tick loop checks every
//! stored job against the local wall clock and delivers due reminders
//! through the log; non-repeating jobs are dropped after firing.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Local, Timelike};
use nudge_core::{ChannelSpec, PermissionStatus, ReminderJob};
use tokio::sync::Notify;
use tracing::{debug, info};

use crate::host::{HostError, NotificationHost};

/// Host backed by process-local state and a wall-clock firing loop.
///
/// Permission is always granted: a process that owns its own output has
/// nothing to ask the user for. Badge counts are accepted and ignored.
pub struct LocalHost {
    jobs: Mutex<HashMap<String, ReminderJob>>,
}

impl LocalHost {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Number of currently stored jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    /// Run the firing loop until `shutdown` is notified.
    ///
    /// Ticks once per wall-clock minute. A job is due when its trigger
    /// matches the current local hour and minute, so a repeating job
    /// fires once per day.
    pub async fn run(&self, shutdown: &Notify) {
        info!(jobs = self.job_count(), "local host firing loop started");
        loop {
            let sleep = until_next_minute(Local::now());
            tokio::select! {
                _ = shutdown.notified() => break,
                _ = tokio::time::sleep(sleep) => {}
            }
            self.fire_due(Local::now());
        }
        info!("local host firing loop stopped");
    }

    /// Deliver every job whose trigger matches `now`, dropping one-shots.
    fn fire_due(&self, now: DateTime<Local>) {
        let (hour, minute) = (now.hour(), now.minute());
        let mut jobs = self.jobs.lock().unwrap();

        let mut finished = Vec::new();
        for (identifier, job) in jobs.iter() {
            if job.trigger.hour == hour && job.trigger.minute == minute {
                info!(
                    identifier = %identifier,
                    title = %job.title,
                    body = %job.body,
                    "reminder"
                );
                if !job.trigger.repeats {
                    finished.push(identifier.clone());
                }
            }
        }
        for identifier in finished {
            jobs.remove(&identifier);
        }
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Time until the next wall-clock minute boundary.
fn until_next_minute(now: DateTime<Local>) -> Duration {
    Duration::from_secs(60 - u64::from(now.second().min(59)))
}

#[async_trait::async_trait]
impl NotificationHost for LocalHost {
    async fn permission_status(&self) -> Result<PermissionStatus, HostError> {
        Ok(PermissionStatus::Granted)
    }

    async fn request_permission(&self) -> Result<PermissionStatus, HostError> {
        Ok(PermissionStatus::Granted)
    }

    async fn configure_channel(&self, channel: &ChannelSpec) -> Result<(), HostError> {
        debug!(channel = %channel.name, "local host has no channels, accepted as no-op");
        Ok(())
    }

    async fn set_badge_count(&self, count: u32) -> Result<(), HostError> {
        debug!(count, "local host has no badge, accepted as no-op");
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), HostError> {
        let mut jobs = self.jobs.lock().unwrap();
        debug!(cancelled = jobs.len(), "local host: cancel-all");
        jobs.clear();
        Ok(())
    }

    async fn schedule(&self, job: &ReminderJob) -> Result<(), HostError> {
        self.jobs
            .lock()
            .unwrap()
            .insert(job.identifier.clone(), job.clone());
        Ok(())
    }

    async fn send_immediate(&self, title: &str, body: &str) -> Result<(), HostError> {
        info!(title, body, "reminder");
        Ok(())
    }

    fn host_name(&self) -> &str {
        "local"
    }
}
