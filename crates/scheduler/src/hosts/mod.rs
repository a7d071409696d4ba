//! Concrete host notification service implementations.

pub mod local;
pub mod memory;
pub mod webhook;

pub use local::LocalHost;
pub use memory::MemoryHost;
pub use webhook::WebhookHost;
