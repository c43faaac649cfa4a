//! Error types for the ticker crate.
//!
//! Two layers: [`ServiceError`] is what an underlying timer service reports
//! when it cannot accept a registration, and [`TickerError`] is what the
//! handle's arm operations return to the caller.

use thiserror::Error;

/// Failure reported by a [`TimerService`](crate::service::TimerService).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Every registration slot of the service is in use.
    #[error("Timer service exhausted: all {capacity} registration slots in use")]
    Exhausted {
        /// Number of registrations the service can hold.
        capacity: usize,
    },

    /// The service rejected a parameter of the registration request.
    #[error("Invalid registration argument: {0}")]
    InvalidArgument(&'static str),

    /// The service is not running (never started or already shut down).
    #[error("Timer service unavailable")]
    Unavailable,
}

impl ServiceError {
    /// Create an exhausted error.
    #[must_use]
    pub fn exhausted(capacity: usize) -> Self {
        Self::Exhausted { capacity }
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: &'static str) -> Self {
        Self::InvalidArgument(reason)
    }

    /// Whether the same request may succeed later without changes.
    ///
    /// Only capacity failures qualify. The handle never retries on its own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }
}

/// Errors returned by [`Ticker`](crate::Ticker) arm operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TickerError {
    /// The underlying timer service refused the registration.
    #[error("Timer service error: {0}")]
    Service(#[from] ServiceError),

    /// A fractional-second interval could not be expressed in milliseconds.
    #[error("Invalid interval: {seconds} s is not a finite, non-negative millisecond count")]
    InvalidInterval {
        /// The rejected value in seconds.
        seconds: f32,
    },
}

impl TickerError {
    /// Create an invalid interval error.
    #[must_use]
    pub fn invalid_interval(seconds: f32) -> Self {
        Self::InvalidInterval { seconds }
    }

    /// The service error behind this failure, if any.
    #[must_use]
    pub fn service_error(&self) -> Option<ServiceError> {
        match self {
            Self::Service(e) => Some(*e),
            Self::InvalidInterval { .. } => None,
        }
    }
}

/// A specialized `Result` type for ticker operations.
pub type TickerResult<T = ()> = Result<T, TickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServiceError::exhausted(8);
        assert!(err.to_string().contains('8'));

        let err = TickerError::from(ServiceError::Unavailable);
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn test_only_exhaustion_is_retryable() {
        assert!(ServiceError::exhausted(1).is_retryable());
        assert!(!ServiceError::Unavailable.is_retryable());
        assert!(!ServiceError::invalid_argument("zero period").is_retryable());
    }

    #[test]
    fn test_service_error_accessor() {
        let err = TickerError::from(ServiceError::exhausted(4));
        assert_eq!(err.service_error(), Some(ServiceError::Exhausted { capacity: 4 }));

        let err = TickerError::invalid_interval(-1.0);
        assert_eq!(err.service_error(), None);
    }
}
