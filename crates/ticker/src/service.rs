//! The contract a [`Ticker`](crate::Ticker) requires from the underlying timer service.
//!
//! The service owns timekeeping, dispatch, and whatever resource backs a
//! registration. A ticker only ever creates, cancels, and destroys.

use std::sync::Arc;

use crate::arg::ArgSlot;
use crate::callback::TickCallback;
use crate::error::ServiceError;

/// Whether a registration fires once or keeps firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatMode {
    /// Fire once, then retire.
    Once,
    /// Fire every interval until cancelled.
    Periodic,
}

impl RepeatMode {
    /// Whether the registration re-arms after firing.
    #[inline]
    #[must_use]
    pub fn repeats(self) -> bool {
        matches!(self, Self::Periodic)
    }
}

/// An underlying timer service.
///
/// Implementations must invoke `callback.invoke(arg)` at or after each due
/// time, on an execution context of their choosing, and must support both
/// one-shot and periodic registrations natively.
pub trait TimerService {
    /// Opaque handle to one registration.
    type Registration;

    /// Register `callback` to fire `interval_ms` milliseconds from now, and
    /// every `interval_ms` thereafter when `mode` is [`RepeatMode::Periodic`].
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the service cannot hold another
    /// registration, rejects the parameters, or is not running.
    fn create_registration(
        &self,
        interval_ms: u32,
        mode: RepeatMode,
        callback: TickCallback,
        arg: ArgSlot,
    ) -> Result<Self::Registration, ServiceError>;

    /// Stop future firings of `registration`. Idempotent.
    fn cancel_registration(&self, registration: &Self::Registration);

    /// Release the resource backing `registration`.
    fn destroy_registration(&self, registration: Self::Registration);

    /// Whether the service still has a firing of `registration` queued.
    ///
    /// A one-shot that already fired reads `false` here.
    fn is_pending(&self, registration: &Self::Registration) -> bool;
}

impl<S: TimerService + ?Sized> TimerService for &S {
    type Registration = S::Registration;

    fn create_registration(
        &self,
        interval_ms: u32,
        mode: RepeatMode,
        callback: TickCallback,
        arg: ArgSlot,
    ) -> Result<Self::Registration, ServiceError> {
        (**self).create_registration(interval_ms, mode, callback, arg)
    }

    fn cancel_registration(&self, registration: &Self::Registration) {
        (**self).cancel_registration(registration);
    }

    fn destroy_registration(&self, registration: Self::Registration) {
        (**self).destroy_registration(registration);
    }

    fn is_pending(&self, registration: &Self::Registration) -> bool {
        (**self).is_pending(registration)
    }
}

impl<S: TimerService + ?Sized> TimerService for Arc<S> {
    type Registration = S::Registration;

    fn create_registration(
        &self,
        interval_ms: u32,
        mode: RepeatMode,
        callback: TickCallback,
        arg: ArgSlot,
    ) -> Result<Self::Registration, ServiceError> {
        (**self).create_registration(interval_ms, mode, callback, arg)
    }

    fn cancel_registration(&self, registration: &Self::Registration) {
        (**self).cancel_registration(registration);
    }

    fn destroy_registration(&self, registration: Self::Registration) {
        (**self).destroy_registration(registration);
    }

    fn is_pending(&self, registration: &Self::Registration) -> bool {
        (**self).is_pending(registration)
    }
}
