//! Webhook host: bridges every host call to a device-side gateway as JSON
//! over HTTP.
//!
//! The gateway (typically a companion service running next to the actual
//! OS notification facility) owns the real schedule; this adapter only
//! forwards the engine's declarative calls and maps transport or non-2xx
//! responses into [`HostError`].

use nudge_core::{ChannelSpec, PermissionStatus, ReminderJob};
use serde::Deserialize;
use serde_json::json;

use crate::host::{HostError, NotificationHost};

/// Forwards host calls to `{base_url}/<endpoint>`:
///
/// - `GET  /permission` and `POST /permission/request` → `{"status": ...}`
/// - `POST /channel`, `/badge`, `/cancel_all`, `/schedule`, `/immediate`
#[derive(Debug)]
pub struct WebhookHost {
    base_url: String,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PermissionResponse {
    status: PermissionStatus,
}

impl WebhookHost {
    /// Create a webhook host targeting `base_url`.
    ///
    /// The URL is validated eagerly; a malformed or non-HTTP URL is a
    /// [`HostError::Config`] at construction, not a per-call surprise.
    pub fn new(base_url: String) -> Result<Self, HostError> {
        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| HostError::Config(format!("invalid gateway URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HostError::Config(format!(
                "gateway URL must be http(s), got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<(), HostError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(HostError::Rejected(format!(
                "{path} returned {status}: {reason}"
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl NotificationHost for WebhookHost {
    async fn permission_status(&self) -> Result<PermissionStatus, HostError> {
        let response = self
            .client
            .get(self.endpoint("permission"))
            .send()
            .await?
            .error_for_status()?;
        let parsed: PermissionResponse = response.json().await?;
        Ok(parsed.status)
    }

    async fn request_permission(&self) -> Result<PermissionStatus, HostError> {
        let response = self
            .client
            .post(self.endpoint("permission/request"))
            .json(&json!({}))
            .send()
            .await?
            .error_for_status()?;
        let parsed: PermissionResponse = response.json().await?;
        Ok(parsed.status)
    }

    async fn configure_channel(&self, channel: &ChannelSpec) -> Result<(), HostError> {
        self.post("channel", serde_json::to_value(channel).unwrap_or_default())
            .await
    }

    async fn set_badge_count(&self, count: u32) -> Result<(), HostError> {
        self.post("badge", json!({ "count": count })).await
    }

    async fn cancel_all(&self) -> Result<(), HostError> {
        self.post("cancel_all", json!({})).await
    }

    async fn schedule(&self, job: &ReminderJob) -> Result<(), HostError> {
        self.post("schedule", serde_json::to_value(job).unwrap_or_default())
            .await
    }

    async fn send_immediate(&self, title: &str, body: &str) -> Result<(), HostError> {
        self.post("immediate", json!({ "title": title, "body": body }))
            .await
    }

    fn host_name(&self) -> &str {
        "webhook"
    }
}
