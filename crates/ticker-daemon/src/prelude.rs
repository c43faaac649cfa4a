//! Prelude module for common daemon types.

pub use crate::config::{DaemonConfig, DaemonConfigBuilder};
pub use crate::error::{DaemonError, DaemonResult};
pub use crate::service::{DaemonRegistration, DaemonStats, DaemonTimerService};
