//! Snapshot tests for error message formatting.

use insta::assert_snapshot;
use ticker::{ServiceError, TickerError};

#[test]
fn test_exhausted() {
    assert_snapshot!(
        ServiceError::exhausted(16).to_string(),
        @"Timer service exhausted: all 16 registration slots in use"
    );
}

#[test]
fn test_invalid_argument() {
    assert_snapshot!(
        ServiceError::invalid_argument("periodic interval must be non-zero").to_string(),
        @"Invalid registration argument: periodic interval must be non-zero"
    );
}

#[test]
fn test_unavailable_wrapped() {
    assert_snapshot!(
        TickerError::from(ServiceError::Unavailable).to_string(),
        @"Timer service error: Timer service unavailable"
    );
}

#[test]
fn test_invalid_interval() {
    assert_snapshot!(
        TickerError::invalid_interval(-0.5).to_string(),
        @"Invalid interval: -0.5 s is not a finite, non-negative millisecond count"
    );
}
