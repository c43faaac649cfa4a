//! Unwrap helpers with good error messages.
//!
//! These replace `unwrap()` and `expect()` in test code. All of them are
//! `#[track_caller]`, so a failure points at the test line, not here.

use std::fmt::Debug;

/// Unwrap a `Result`, panicking with the error value on `Err`.
///
/// ```rust
/// use ticker_test_helpers::must;
///
/// let interval = must(ticker::Interval::try_from_secs_f32(0.5));
/// assert_eq!(interval.as_millis(), 500);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap a `Result`, panicking with `context` and the error value on `Err`.
///
/// # Panics
///
/// Panics if the result is `Err`.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}

/// Unwrap the error of a `Result` that is expected to fail.
///
/// ```rust
/// use ticker::TickerError;
/// use ticker_test_helpers::must_err;
///
/// let err = must_err(ticker::Interval::try_from_secs_f32(-1.0));
/// assert!(matches!(err, TickerError::InvalidInterval { .. }));
/// ```
///
/// # Panics
///
/// Panics if the result is `Ok`.
#[track_caller]
pub fn must_err<T: Debug, E>(result: Result<T, E>) -> E {
    match result {
        Ok(v) => panic!("must_err: unexpected Ok: {v:?}"),
        Err(e) => e,
    }
}

/// Unwrap an `Option`, panicking with `msg` on `None`.
///
/// # Panics
///
/// Panics if the option is `None`.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}
