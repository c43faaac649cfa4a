//! Shared test utilities for ticker.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`mock`] - [`ManualTimerService`], a virtual-clock timer service
//! - [`logging`] - One-call `tracing` subscriber setup for tests
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! ticker-test-helpers = { workspace = true }
//! ```
//!
//! ```rust,ignore
//! use ticker_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod must;
pub mod prelude;

#[cfg(feature = "mock")]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub mod mock;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

pub use must::*;

#[cfg(feature = "mock")]
pub use mock::{ManualRegistration, ManualStats, ManualTimerService};

#[cfg(feature = "logging")]
pub use logging::init_test_tracing;
