//! # ticker
//!
//! Attach a function to run once, or repeatedly at a fixed interval, without
//! touching the underlying timer service directly.
//!
//! A [`Ticker`] owns at most one registration with a [`TimerService`]. Every
//! arm variant (periodic or one-shot, with or without a bound argument)
//! funnels into the same request: a millisecond interval, a [`RepeatMode`],
//! a [`TickCallback`], and a 4-byte [`ArgSlot`].
//!
//! ## Allocation
//!
//! - The callback is a plain function pointer, kept in a `Copy` tagged union
//! - The bound argument lives in a fixed 4-byte slot
//! - Nothing is allocated by the handle; the service owns the registration
//!
//! ## Modules
//!
//! - [`handle`] - The [`Ticker`] handle
//! - [`service`] - The timer-service contract
//! - [`interval`] - Millisecond-normalized intervals
//! - [`arg`] - The argument slot and bindable argument types
//! - [`callback`] - The uniform callback
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use ticker::{Interval, Ticker};
//! use ticker_test_helpers::ManualTimerService;
//! use std::sync::atomic::{AtomicU8, Ordering};
//! use std::time::Duration;
//!
//! static LED: AtomicU8 = AtomicU8::new(0);
//!
//! fn set_led(level: u8) {
//!     LED.store(level, Ordering::Relaxed);
//! }
//!
//! let service = ManualTimerService::new();
//! let mut ticker = Ticker::new(&service);
//! ticker.arm_once_with_arg(Interval::from_secs(1), set_led, 200u8)?;
//!
//! service.advance(Duration::from_secs(1));
//! assert_eq!(LED.load(Ordering::Relaxed), 200);
//! # Ok::<(), ticker::TickerError>(())
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

pub mod arg;
pub mod callback;
pub mod error;
pub mod handle;
pub mod interval;
pub mod service;

pub mod prelude;

pub use arg::{ARG_SLOT_BYTES, ArgSlot, TickerArg};
pub use callback::TickCallback;
pub use error::{ServiceError, TickerError, TickerResult};
pub use handle::Ticker;
pub use interval::Interval;
pub use service::{RepeatMode, TimerService};
