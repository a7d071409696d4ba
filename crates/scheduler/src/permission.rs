//! Permission gate: readiness checks that precede every scheduling run.
//!
//! The gate never errors outward. Host failures during the checks are
//! logged and collapse to "not ready"; a denied or unavailable
//! environment is an expected outcome, not an exception.

use nudge_core::{ChannelSpec, PermissionStatus};
use tracing::{debug, info, warn};

use crate::host::NotificationHost;

/// Ensures the environment is eligible and permission is granted before
/// any jobs are touched.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    channel: ChannelSpec,
    /// Treat the environment as unable to receive notifications,
    /// regardless of what the host reports.
    simulated: bool,
}

impl PermissionGate {
    pub fn new(channel: ChannelSpec, simulated: bool) -> Self {
        Self { channel, simulated }
    }

    /// The channel this gate configures on every run.
    pub fn channel(&self) -> &ChannelSpec {
        &self.channel
    }

    /// Run the full readiness sequence against `host`.
    ///
    /// 1. Configure the notification channel (idempotent; failure is
    ///    logged and non-fatal).
    /// 2. Bail with `false` if the environment cannot receive
    ///    notifications at all.
    /// 3. Query permission; request it interactively if not already
    ///    granted.
    /// 4. On grant, reset the badge counter to zero as a side effect of
    ///    readiness.
    ///
    /// Returns `true` iff the final permission state is granted.
    pub async fn ensure_ready(&self, host: &dyn NotificationHost) -> bool {
        if let Err(e) = host.configure_channel(&self.channel).await {
            warn!(
                channel = %self.channel.name,
                error = %e,
                "channel configuration failed"
            );
        }

        if self.simulated || !host.notifications_supported() {
            info!(host = host.host_name(), "environment cannot receive notifications");
            return false;
        }

        let status = match host.permission_status().await {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "permission query failed");
                return false;
            }
        };

        let status = if status == PermissionStatus::Granted {
            status
        } else {
            debug!(?status, "permission not granted yet, requesting");
            match host.request_permission().await {
                Ok(s) => s,
                Err(e) => {
                    warn!(error = %e, "permission request failed");
                    return false;
                }
            }
        };

        if status != PermissionStatus::Granted {
            info!(?status, "notification permission not granted");
            return false;
        }

        if let Err(e) = host.set_badge_count(0).await {
            warn!(error = %e, "badge reset failed");
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::memory::MemoryHost;

    #[tokio::test]
    async fn granted_permission_passes_and_resets_badge() {
        let host = MemoryHost::new();
        host.set_badge(7);
        let gate = PermissionGate::new(ChannelSpec::reminders("reminders"), false);

        assert!(gate.ensure_ready(&host).await);
        assert_eq!(host.badge(), 0);
        // Badge reset is a side effect of readiness, exactly once per pass.
        assert_eq!(host.badge_set_calls(), 1);
        assert_eq!(host.configured_channel().unwrap().name, "reminders");
    }

    #[tokio::test]
    async fn undetermined_permission_is_requested_once() {
        let host = MemoryHost::with_permission(PermissionStatus::Undetermined, true);
        let gate = PermissionGate::new(ChannelSpec::reminders("reminders"), false);

        assert!(gate.ensure_ready(&host).await);
        assert_eq!(host.permission_requests(), 1);
    }

    #[tokio::test]
    async fn denied_request_fails_the_gate() {
        let host = MemoryHost::with_permission(PermissionStatus::Undetermined, false);
        let gate = PermissionGate::new(ChannelSpec::reminders("reminders"), false);

        assert!(!gate.ensure_ready(&host).await);
        assert_eq!(host.permission_requests(), 1);
        assert_eq!(host.badge_set_calls(), 0);
    }

    #[tokio::test]
    async fn simulated_environment_fails_without_prompting() {
        let host = MemoryHost::new();
        let gate = PermissionGate::new(ChannelSpec::reminders("reminders"), true);

        assert!(!gate.ensure_ready(&host).await);
        assert_eq!(host.permission_requests(), 0);
        assert_eq!(host.permission_queries(), 0);
    }

    #[tokio::test]
    async fn unsupported_host_fails_without_prompting() {
        let host = MemoryHost::unsupported();
        let gate = PermissionGate::new(ChannelSpec::reminders("reminders"), false);

        assert!(!gate.ensure_ready(&host).await);
        assert_eq!(host.permission_queries(), 0);
    }
}
