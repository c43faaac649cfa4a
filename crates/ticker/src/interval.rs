//! Firing interval normalized to whole milliseconds.

use core::time::Duration;

use crate::error::{TickerError, TickerResult};

/// First millisecond count that no longer fits in `u32` (2^32, exact in `f32`).
const MS_LIMIT_F32: f32 = 4_294_967_296.0;

/// Interval between arming and firing, and between periodic firings.
///
/// Stored as whole milliseconds, the unit the timer-service contract takes.
/// Build it from milliseconds, a [`Duration`], or fractional seconds.
///
/// ```
/// use std::time::Duration;
/// use ticker::Interval;
///
/// assert_eq!(Interval::from_millis(250).as_millis(), 250);
/// assert_eq!(Interval::from(Duration::from_secs(2)).as_millis(), 2000);
/// assert_eq!(Interval::try_from_secs_f32(0.5)?.as_millis(), 500);
/// # Ok::<(), ticker::TickerError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Interval {
    millis: u32,
}

impl Interval {
    /// Interval of `millis` whole milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u32) -> Self {
        Self { millis }
    }

    /// Interval of `secs` whole seconds, saturating at `u32::MAX` milliseconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self {
            millis: secs.saturating_mul(1000),
        }
    }

    /// Interval of `seconds` fractional seconds.
    ///
    /// The millisecond count is `seconds * 1000` truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`TickerError::InvalidInterval`] if `seconds` is NaN, infinite,
    /// negative, or too large for a `u32` millisecond count.
    pub fn try_from_secs_f32(seconds: f32) -> TickerResult<Self> {
        let millis = seconds * 1000.0;
        if !millis.is_finite() || millis < 0.0 || millis >= MS_LIMIT_F32 {
            return Err(TickerError::invalid_interval(seconds));
        }

        #[expect(
            clippy::cast_sign_loss,
            clippy::cast_possible_truncation,
            reason = "range checked above; truncation toward zero is the documented rounding"
        )]
        let millis = millis as u32;
        Ok(Self { millis })
    }

    /// Whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> u32 {
        self.millis
    }

    /// The interval as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.millis as u64)
    }

    /// Whether the interval is zero milliseconds.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.millis == 0
    }
}

impl From<u32> for Interval {
    /// Whole milliseconds.
    fn from(millis: u32) -> Self {
        Self::from_millis(millis)
    }
}

impl From<Duration> for Interval {
    /// Truncates sub-millisecond precision and saturates at `u32::MAX` milliseconds.
    fn from(duration: Duration) -> Self {
        Self::from_millis(u32::try_from(duration.as_millis()).unwrap_or(u32::MAX))
    }
}

impl TryFrom<f32> for Interval {
    type Error = TickerError;

    /// Fractional seconds, see [`Interval::try_from_secs_f32`].
    fn try_from(seconds: f32) -> TickerResult<Self> {
        Self::try_from_secs_f32(seconds)
    }
}

impl From<Interval> for Duration {
    fn from(interval: Interval) -> Self {
        interval.as_duration()
    }
}
