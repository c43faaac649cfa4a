//! Prelude module for common ticker types.
//!
//! ```rust
//! use ticker::prelude::*;
//! ```

pub use crate::arg::{ARG_SLOT_BYTES, ArgSlot, TickerArg};
pub use crate::callback::TickCallback;
pub use crate::error::{ServiceError, TickerError, TickerResult};
pub use crate::handle::Ticker;
pub use crate::interval::Interval;
pub use crate::service::{RepeatMode, TimerService};
