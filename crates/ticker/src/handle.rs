//! The scheduled callback handle.

use core::fmt;

use tracing::trace;

use crate::arg::{ArgSlot, TickerArg, assert_fits_slot};
use crate::callback::TickCallback;
use crate::error::TickerResult;
use crate::interval::Interval;
use crate::service::{RepeatMode, TimerService};

/// Handle owning at most one registration with a timer service.
///
/// Arming replaces whatever the handle held before: the previous
/// registration is cancelled and destroyed before the new one is created, so
/// the superseded callback cannot fire once the arm call returns. Dropping
/// the handle cancels and destroys its registration.
///
/// The handle takes no lock. Callbacks run on the service's execution
/// context, so anything they share with the arming code needs its own
/// synchronization.
///
/// # Example
///
/// ```
/// use ticker::{Interval, Ticker};
/// use ticker_test_helpers::ManualTimerService;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::time::Duration;
///
/// static BLINKS: AtomicU32 = AtomicU32::new(0);
///
/// let service = ManualTimerService::new();
/// let mut ticker = Ticker::new(&service);
/// ticker.arm_periodic(Interval::from_millis(500), || {
///     BLINKS.fetch_add(1, Ordering::Relaxed);
/// })?;
///
/// service.advance(Duration::from_millis(1600));
/// assert_eq!(BLINKS.load(Ordering::Relaxed), 3);
///
/// ticker.cancel();
/// assert!(!ticker.is_active());
/// # Ok::<(), ticker::TickerError>(())
/// ```
pub struct Ticker<S: TimerService> {
    service: S,
    registration: Option<S::Registration>,
}

impl<S: TimerService> Ticker<S> {
    /// Create an empty handle on `service`. Nothing is registered yet.
    pub fn new(service: S) -> Self {
        Self {
            service,
            registration: None,
        }
    }

    /// Call `callback` every `interval` until cancelled or dropped.
    ///
    /// # Errors
    ///
    /// Returns the service's failure if the registration cannot be created;
    /// the handle is then empty.
    pub fn arm_periodic(&mut self, interval: impl Into<Interval>, callback: fn()) -> TickerResult {
        self.arm(
            interval.into(),
            RepeatMode::Periodic,
            TickCallback::bare(callback),
            ArgSlot::EMPTY,
        )
    }

    /// Call `callback(arg)` every `interval` until cancelled or dropped.
    ///
    /// `A` must fit in 4 bytes; a larger type fails to build. To bind a
    /// caller-defined value (a `#[repr(u8)]` enum, a packed pair), encode it
    /// into an [`ArgSlot`] and decode it inside a `fn(ArgSlot)` callback.
    ///
    /// # Errors
    ///
    /// Returns the service's failure if the registration cannot be created;
    /// the handle is then empty.
    pub fn arm_periodic_with_arg<A: TickerArg>(
        &mut self,
        interval: impl Into<Interval>,
        callback: fn(A),
        arg: A,
    ) -> TickerResult {
        assert_fits_slot::<A>();
        self.arm(
            interval.into(),
            RepeatMode::Periodic,
            A::bind(callback),
            arg.into_slot(),
        )
    }

    /// Call `callback` once, `interval` from now.
    ///
    /// # Errors
    ///
    /// Returns the service's failure if the registration cannot be created;
    /// the handle is then empty.
    pub fn arm_once(&mut self, interval: impl Into<Interval>, callback: fn()) -> TickerResult {
        self.arm(
            interval.into(),
            RepeatMode::Once,
            TickCallback::bare(callback),
            ArgSlot::EMPTY,
        )
    }

    /// Call `callback(arg)` once, `interval` from now.
    ///
    /// `A` must fit in 4 bytes; a larger type fails to build. To bind a
    /// caller-defined value (a `#[repr(u8)]` enum, a packed pair), encode it
    /// into an [`ArgSlot`] and decode it inside a `fn(ArgSlot)` callback.
    ///
    /// # Errors
    ///
    /// Returns the service's failure if the registration cannot be created;
    /// the handle is then empty.
    pub fn arm_once_with_arg<A: TickerArg>(
        &mut self,
        interval: impl Into<Interval>,
        callback: fn(A),
        arg: A,
    ) -> TickerResult {
        assert_fits_slot::<A>();
        self.arm(
            interval.into(),
            RepeatMode::Once,
            A::bind(callback),
            arg.into_slot(),
        )
    }

    /// Cancel and release the registration, if any. Idempotent.
    ///
    /// A firing the service has already started may still complete; no
    /// firing starts after this returns.
    pub fn cancel(&mut self) {
        if let Some(registration) = self.registration.take() {
            self.service.cancel_registration(&registration);
            self.service.destroy_registration(registration);
            trace!("ticker cancelled");
        }
    }

    /// Whether the handle holds a registration.
    ///
    /// This tracks arm and cancel only. A one-shot that already fired still
    /// reads `true` until [`cancel`](Self::cancel) is called; use
    /// [`is_scheduled`](Self::is_scheduled) to ask the service instead.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registration.is_some()
    }

    /// Whether the service still has a firing queued for this handle.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.registration
            .as_ref()
            .is_some_and(|registration| self.service.is_pending(registration))
    }

    /// The underlying timer service.
    #[inline]
    pub fn service(&self) -> &S {
        &self.service
    }

    fn arm(
        &mut self,
        interval: Interval,
        mode: RepeatMode,
        callback: TickCallback,
        arg: ArgSlot,
    ) -> TickerResult {
        let replaced = self.is_active();
        self.cancel();

        let registration =
            self.service
                .create_registration(interval.as_millis(), mode, callback, arg)?;
        self.registration = Some(registration);

        trace!(
            interval_ms = interval.as_millis(),
            ?mode,
            arg_kind = callback.arg_kind(),
            replaced,
            "ticker armed"
        );
        Ok(())
    }
}

impl<S: TimerService + Default> Default for Ticker<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: TimerService> Drop for Ticker<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<S: TimerService> fmt::Debug for Ticker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticker")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ServiceError, TickerError};
    use std::cell::{Cell, RefCell};

    /// Records calls without ever firing anything.
    #[derive(Default)]
    struct RecordingService {
        next_id: Cell<u32>,
        created: RefCell<Vec<(u32, RepeatMode, ArgSlot)>>,
        cancelled: RefCell<Vec<u32>>,
        destroyed: RefCell<Vec<u32>>,
        refuse: Cell<bool>,
    }

    impl TimerService for RecordingService {
        type Registration = u32;

        fn create_registration(
            &self,
            interval_ms: u32,
            mode: RepeatMode,
            _callback: TickCallback,
            arg: ArgSlot,
        ) -> Result<u32, ServiceError> {
            if self.refuse.get() {
                return Err(ServiceError::exhausted(0));
            }
            self.created.borrow_mut().push((interval_ms, mode, arg));
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            Ok(id)
        }

        fn cancel_registration(&self, registration: &u32) {
            self.cancelled.borrow_mut().push(*registration);
        }

        fn destroy_registration(&self, registration: u32) {
            self.destroyed.borrow_mut().push(registration);
        }

        fn is_pending(&self, registration: &u32) -> bool {
            !self.cancelled.borrow().contains(registration)
        }
    }

    fn noop() {}

    #[test]
    fn test_new_handle_is_empty() {
        let service = RecordingService::default();
        let ticker = Ticker::new(&service);
        assert!(!ticker.is_active());
        assert!(!ticker.is_scheduled());
    }

    #[test]
    fn test_arm_forwards_normalized_request() -> TickerResult {
        let service = RecordingService::default();
        let mut ticker = Ticker::new(&service);

        ticker.arm_periodic_with_arg(Interval::try_from(0.25f32)?, |_: u8| {}, 7u8)?;

        assert!(ticker.is_active());
        assert_eq!(
            service.created.borrow().as_slice(),
            &[(250, RepeatMode::Periodic, ArgSlot::new(7))]
        );
        Ok(())
    }

    #[test]
    fn test_rearm_cancels_then_destroys_previous() -> TickerResult {
        let service = RecordingService::default();
        let mut ticker = Ticker::new(&service);

        ticker.arm_periodic(100u32, noop)?;
        ticker.arm_once(50u32, noop)?;

        assert_eq!(service.cancelled.borrow().as_slice(), &[1]);
        assert_eq!(service.destroyed.borrow().as_slice(), &[1]);
        assert_eq!(service.created.borrow().len(), 2);
        assert!(ticker.is_scheduled());
        Ok(())
    }

    #[test]
    fn test_failed_arm_leaves_handle_empty() -> TickerResult {
        let service = RecordingService::default();
        let mut ticker = Ticker::new(&service);
        ticker.arm_periodic(100u32, noop)?;

        service.refuse.set(true);
        let result = ticker.arm_once(10u32, noop);

        assert!(matches!(
            result,
            Err(TickerError::Service(ServiceError::Exhausted { .. }))
        ));
        assert!(!ticker.is_active());
        assert_eq!(service.destroyed.borrow().as_slice(), &[1]);
        Ok(())
    }

    #[test]
    fn test_cancel_is_idempotent() -> TickerResult {
        let service = RecordingService::default();
        let mut ticker = Ticker::new(&service);
        ticker.cancel();

        ticker.arm_once(10u32, noop)?;
        ticker.cancel();
        ticker.cancel();

        assert_eq!(service.cancelled.borrow().as_slice(), &[1]);
        assert_eq!(service.destroyed.borrow().as_slice(), &[1]);
        Ok(())
    }

    #[test]
    fn test_drop_releases_registration() -> TickerResult {
        let service = RecordingService::default();
        {
            let mut ticker = Ticker::new(&service);
            ticker.arm_periodic(10u32, noop)?;
        }
        assert_eq!(service.cancelled.borrow().as_slice(), &[1]);
        assert_eq!(service.destroyed.borrow().as_slice(), &[1]);
        Ok(())
    }
}
