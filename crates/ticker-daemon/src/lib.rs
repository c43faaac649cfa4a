//! # ticker-daemon
//!
//! A hosted [`TimerService`](ticker::TimerService) for `ticker`: a
//! fixed-capacity registration table served by one dedicated timer-daemon
//! thread, the dispatch model of ESP-IDF's `esp_timer` task.
//!
//! ## Guarantees
//!
//! - **Fixed capacity**: the table is sized once from [`DaemonConfig`];
//!   a full table refuses new registrations with `ServiceError::Exhausted`
//! - **Ordered dispatch**: callbacks run one at a time on the daemon thread,
//!   earliest due first
//! - **Synchronous cancellation**: after `cancel_registration` returns on a
//!   non-daemon thread, that callback is neither running nor queued
//! - **Panic isolation**: a panicking callback is logged and counted; the
//!   daemon keeps serving
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ticker::{Interval, Ticker};
//! use ticker_daemon::prelude::*;
//!
//! fn heartbeat() {}
//!
//! let config = DaemonConfig::builder()
//!     .capacity(8)
//!     .thread_name("heartbeat-timer")
//!     .build()?;
//! let service = Arc::new(DaemonTimerService::start(config)?);
//!
//! let mut ticker = Ticker::new(Arc::clone(&service));
//! ticker.arm_periodic(Interval::from_secs(1), heartbeat)?;
//! assert_eq!(service.stats().live, 1);
//!
//! drop(ticker);
//! assert_eq!(service.stats().live, 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod service;

pub mod prelude;

pub use config::{DaemonConfig, DaemonConfigBuilder, MAX_CAPACITY, MIN_STACK_SIZE};
pub use error::{DaemonError, DaemonResult};
pub use service::{DaemonRegistration, DaemonStats, DaemonTimerService};
