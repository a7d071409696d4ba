//! Shared building blocks for the nudge reminder engine.
//!
//! This crate provides:
//! - Reminder job and trigger data model
//! - The static anchor catalog (fixed and randomized daily slots)
//! - `MessagePool` for uniform random reminder bodies
//! - The time jitter engine (bounded random perturbation of an anchor)
//! - Environment-driven configuration

pub mod anchors;
pub mod config;
pub mod jitter;
pub mod job;
pub mod messages;

pub use anchors::{AnchorSpec, FIXED_ANCHORS, RANDOM_ANCHORS};
pub use config::Config;
pub use jitter::{jitter, jitter_with_offset, JitterResult};
pub use job::{ChannelSpec, DeliveryStyle, PermissionStatus, ReminderJob, Trigger};
pub use messages::MessagePool;
