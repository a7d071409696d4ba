//! Environment-driven configuration.
//!
//! All keys are `NUDGE_`-prefixed and optional; every field has a default
//! so a bare environment yields a working local setup.

use std::env;

use serde::{Deserialize, Serialize};

use crate::job::ChannelSpec;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_i32(key: &str, default: i32) -> i32 {
    match env_opt(key) {
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, default, "unparseable env var, using default");
            default
        }),
        None => default,
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    match env_opt(key) {
        Some(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"),
        None => default,
    }
}

/// Engine configuration (call [`load_dotenv`] first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pretend the environment cannot receive notifications
    /// (`NUDGE_SIMULATED`). The permission gate then reports not-ready
    /// without touching the host, mirroring a simulator build.
    pub simulated: bool,
    /// Maximum jitter magnitude in minutes (`NUDGE_MAX_JITTER`).
    pub max_jitter_minutes: i32,
    /// Notification channel name (`NUDGE_CHANNEL`).
    pub channel: String,
    /// Device gateway endpoint for the webhook host
    /// (`NUDGE_WEBHOOK_URL`). Unset means the in-process local host.
    pub webhook_url: Option<String>,
}

impl Config {
    /// Build config from environment variables.
    pub fn from_env() -> Self {
        // The jitter normalization handles a single hour carry/borrow,
        // so the maximum must stay within one hour.
        let raw_jitter = env_i32("NUDGE_MAX_JITTER", 30);
        let max_jitter_minutes = raw_jitter.clamp(0, 59);
        if max_jitter_minutes != raw_jitter {
            tracing::warn!(
                configured = raw_jitter,
                clamped = max_jitter_minutes,
                "NUDGE_MAX_JITTER out of range, clamping to [0, 59]"
            );
        }

        Self {
            simulated: env_bool("NUDGE_SIMULATED", false),
            max_jitter_minutes,
            channel: env_or("NUDGE_CHANNEL", "reminders"),
            webhook_url: env_opt("NUDGE_WEBHOOK_URL"),
        }
    }

    /// Channel configuration derived from this config.
    pub fn channel_spec(&self) -> ChannelSpec {
        ChannelSpec::reminders(&self.channel)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulated: false,
            max_jitter_minutes: 30,
            channel: "reminders".to_string(),
            webhook_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_catalog() {
        let cfg = Config::default();
        assert_eq!(cfg.max_jitter_minutes, 30);
        assert_eq!(cfg.channel, "reminders");
        assert!(!cfg.simulated);
        assert!(cfg.webhook_url.is_none());
    }

    #[test]
    fn out_of_range_jitter_env_is_clamped() {
        // Single test owning NUDGE_MAX_JITTER, so parallel test runs
        // never race on the variable.
        env::set_var("NUDGE_MAX_JITTER", "90");
        assert_eq!(Config::from_env().max_jitter_minutes, 59);

        env::set_var("NUDGE_MAX_JITTER", "-10");
        assert_eq!(Config::from_env().max_jitter_minutes, 0);

        env::set_var("NUDGE_MAX_JITTER", "45");
        assert_eq!(Config::from_env().max_jitter_minutes, 45);

        env::remove_var("NUDGE_MAX_JITTER");
    }

    #[test]
    fn channel_spec_uses_configured_name() {
        let cfg = Config {
            channel: "study".to_string(),
            ..Config::default()
        };
        let spec = cfg.channel_spec();
        assert_eq!(spec.name, "study");
        assert!(spec.show_badge);
    }
}
