//! In-memory host: backing store for tests and `--dry-run` runs.
//!
//! Implements the full host contract against process-local state, with
//! scriptable permission behavior so the gate's branches can be exercised
//! deterministically.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use nudge_core::{ChannelSpec, PermissionStatus, ReminderJob};
use tracing::debug;

use crate::host::{HostError, NotificationHost};

/// Host that keeps every scheduled job in a process-local map, keyed by
/// identifier (so re-scheduling replaces, never duplicates).
pub struct MemoryHost {
    jobs: Mutex<HashMap<String, ReminderJob>>,
    channel: Mutex<Option<ChannelSpec>>,
    immediate: Mutex<Vec<(String, String)>>,
    permission: Mutex<PermissionStatus>,
    /// What a permission request resolves to: grant, or leave denied.
    grant_on_request: bool,
    supported: bool,
    badge: AtomicU32,
    badge_sets: AtomicUsize,
    permission_queries: AtomicUsize,
    permission_requests: AtomicUsize,
    cancel_calls: AtomicUsize,
}

impl MemoryHost {
    /// Host with permission already granted.
    pub fn new() -> Self {
        Self::with_permission(PermissionStatus::Granted, true)
    }

    /// Host with a scripted permission flow: `initial` is reported on
    /// query; a request resolves to granted when `grant_on_request`,
    /// denied otherwise.
    pub fn with_permission(initial: PermissionStatus, grant_on_request: bool) -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
            channel: Mutex::new(None),
            immediate: Mutex::new(Vec::new()),
            permission: Mutex::new(initial),
            grant_on_request,
            supported: true,
            badge: AtomicU32::new(0),
            badge_sets: AtomicUsize::new(0),
            permission_queries: AtomicUsize::new(0),
            permission_requests: AtomicUsize::new(0),
            cancel_calls: AtomicUsize::new(0),
        }
    }

    /// Host that reports an environment unable to receive notifications.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn scheduled_identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.jobs.lock().unwrap().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    pub fn job(&self, identifier: &str) -> Option<ReminderJob> {
        self.jobs.lock().unwrap().get(identifier).cloned()
    }

    pub fn job_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn immediate_sent(&self) -> Vec<(String, String)> {
        self.immediate.lock().unwrap().clone()
    }

    pub fn configured_channel(&self) -> Option<ChannelSpec> {
        self.channel.lock().unwrap().clone()
    }

    pub fn badge(&self) -> u32 {
        self.badge.load(Ordering::SeqCst)
    }

    /// Pre-seed the badge without counting as a host call.
    pub fn set_badge(&self, count: u32) {
        self.badge.store(count, Ordering::SeqCst);
    }

    /// How many times the engine called `set_badge_count`.
    pub fn badge_set_calls(&self) -> usize {
        self.badge_sets.load(Ordering::SeqCst)
    }

    pub fn permission_queries(&self) -> usize {
        self.permission_queries.load(Ordering::SeqCst)
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NotificationHost for MemoryHost {
    fn notifications_supported(&self) -> bool {
        self.supported
    }

    async fn permission_status(&self) -> Result<PermissionStatus, HostError> {
        self.permission_queries.fetch_add(1, Ordering::SeqCst);
        Ok(*self.permission.lock().unwrap())
    }

    async fn request_permission(&self) -> Result<PermissionStatus, HostError> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        let resolved = if self.grant_on_request {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        *self.permission.lock().unwrap() = resolved;
        Ok(resolved)
    }

    async fn configure_channel(&self, channel: &ChannelSpec) -> Result<(), HostError> {
        // Re-configuring the same channel is a no-op by contract.
        *self.channel.lock().unwrap() = Some(channel.clone());
        Ok(())
    }

    async fn set_badge_count(&self, count: u32) -> Result<(), HostError> {
        self.badge_sets.fetch_add(1, Ordering::SeqCst);
        self.badge.store(count, Ordering::SeqCst);
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), HostError> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        let mut jobs = self.jobs.lock().unwrap();
        debug!(cancelled = jobs.len(), "memory host: cancel-all");
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
        self.immediate
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }

    fn host_name(&self) -> &str {
        "memory"
    }
}
