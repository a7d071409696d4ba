//! Reminder scheduling engine for nudge.
//!
//! This crate provides:
//! - `NotificationHost` trait for pluggable host notification services
//! - Permission gate that must pass before any scheduling happens
//! - Schedule orchestrator: declarative, idempotent re-sync of the
//!   daily reminder set (cancel-all, then rebuild all nine jobs)
//! - Immediate one-shot notification path
//! - Local, in-memory, and webhook host implementations

pub mod host;
pub mod hosts;
pub mod orchestrator;
pub mod permission;

pub use host::{HostError, NotificationHost};
pub use orchestrator::{send_now, ReminderScheduler, ScheduleReport, SubmitResult};
pub use permission::PermissionGate;
