//! Host notification service contract and shared error type.

use nudge_core::{ChannelSpec, PermissionStatus, ReminderJob};

/// Errors a host can report back to the engine.
///
/// Nothing here is fatal to the caller: the gate degrades to "not ready"
/// and the orchestrator records per-job failures and moves on.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("host rejected the request: {0}")]
    Rejected(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// The operating-system-level facility that stores, fires, and delivers
/// scheduled local notifications.
///
/// The engine keeps no authoritative copy of what is currently scheduled;
/// it re-asserts the desired steady state through this interface on every
/// run. Scheduling a job whose identifier already exists replaces the
/// prior job. Delivery and repeat-firing are entirely the host's concern.
#[async_trait::async_trait]
pub trait NotificationHost: Send + Sync {
    /// Whether this environment can receive local notifications at all.
    /// `false` (e.g. a simulator) is expected and non-exceptional.
    fn notifications_supported(&self) -> bool {
        true
    }

    /// Current permission state, without prompting the user.
    async fn permission_status(&self) -> Result<PermissionStatus, HostError>;

    /// Prompt the user for permission and report the resulting state.
    async fn request_permission(&self) -> Result<PermissionStatus, HostError>;

    /// Configure the notification channel. Idempotent: configuring an
    /// already-configured channel is a no-op, not an error.
    async fn configure_channel(&self, channel: &ChannelSpec) -> Result<(), HostError>;

    /// Set the app badge counter, where the host supports one.
    async fn set_badge_count(&self, count: u32) -> Result<(), HostError>;

    /// Cancel every scheduled job. Cancelling zero jobs is success.
    async fn cancel_all(&self) -> Result<(), HostError>;

    /// Register a job under its identifier, replacing any prior job with
    /// the same identifier.
    async fn schedule(&self, job: &ReminderJob) -> Result<(), HostError>;

    /// Deliver a one-shot notification immediately, outside any
    /// identifier bookkeeping.
    async fn send_immediate(&self, title: &str, body: &str) -> Result<(), HostError>;

    /// Human-readable name for this host (e.g. "local", "webhook").
    fn host_name(&self) -> &str;
}
