//! Reminder job data model shared between the orchestrator and host adapters.

use serde::{Deserialize, Serialize};

/// When a reminder should fire.
///
/// `repeats = true` means "every day at this wall-clock time, local
/// timezone"; `false` is a one-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Wall-clock hour, always in `[0, 23]`.
    pub hour: u32,
    /// Wall-clock minute, always in `[0, 59]`.
    pub minute: u32,
    /// Whether the reminder recurs daily.
    pub repeats: bool,
}

impl Trigger {
    /// Daily recurring trigger at the given wall-clock time.
    pub fn daily(hour: u32, minute: u32) -> Self {
        Self {
            hour,
            minute,
            repeats: true,
        }
    }
}

/// Delivery metadata attached at construction and passed through to the
/// host untouched. Opaque to the scheduling logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStyle {
    /// Play the default notification sound.
    pub sound: bool,
    /// Request high/max delivery priority from the host.
    pub high_priority: bool,
    /// Increment the app badge counter on delivery.
    pub badge_increment: bool,
    /// Host notification channel this job is delivered through.
    pub channel: String,
    /// Accent color hint (e.g. `"#FF231F7C"`), where the host supports one.
    pub color: Option<String>,
}

impl DeliveryStyle {
    /// Standard delivery style for scheduled reminders on `channel`.
    pub fn standard(channel: &str) -> Self {
        Self {
            sound: true,
            high_priority: true,
            badge_increment: true,
            channel: channel.to_string(),
            color: Some("#FF231F7C".to_string()),
        }
    }
}

/// A fully resolved reminder, ready to hand to the host.
///
/// Re-scheduling with the same `identifier` replaces the prior job rather
/// than duplicating it; the body is resolved once at schedule time and
/// never re-drawn before firing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderJob {
    /// Stable key, unique per logical slot (e.g. `daily_morning`).
    pub identifier: String,
    /// Short fixed label for the reminder category.
    pub title: String,
    /// Message text, drawn from the pool at schedule time.
    pub body: String,
    pub trigger: Trigger,
    pub delivery: DeliveryStyle,
}

/// Host notification channel configuration. Configuring an
/// already-configured channel is a no-op on every host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub name: String,
    /// Host importance level, 0 (none) through 5 (max).
    pub importance: u8,
    /// Vibration timing pattern in milliseconds.
    pub vibration_pattern: Vec<u64>,
    /// LED color for hosts with a notification light.
    pub light_color: String,
    pub sound: bool,
    pub enable_vibrate: bool,
    pub show_badge: bool,
}

impl ChannelSpec {
    /// Channel carrying all recurring reminders.
    pub fn reminders(name: &str) -> Self {
        Self {
            name: name.to_string(),
            importance: 5,
            vibration_pattern: vec![0, 250, 250, 250],
            light_color: "#FF231F7C".to_string(),
            sound: true,
            enable_vibrate: true,
            show_badge: true,
        }
    }
}

/// Host-reported notification permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet; a request prompt is still possible.
    Undetermined,
}
