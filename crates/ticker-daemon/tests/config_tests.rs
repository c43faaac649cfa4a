//! Configuration loading and validation tests.

use ticker_daemon::prelude::*;
use ticker_daemon::{MAX_CAPACITY, MIN_STACK_SIZE};
use ticker_test_helpers::prelude::*;

#[test]
fn test_json_round_trip() -> TestResult {
    let config = DaemonConfig::builder()
        .capacity(64)
        .thread_name("led-timer")
        .stack_size(64 * 1024)
        .build()?;

    let json = serde_json::to_string(&config)?;
    let decoded: DaemonConfig = serde_json::from_str(&json)?;
    assert_eq!(decoded, config);
    Ok(())
}

#[test]
fn test_missing_fields_take_defaults() -> TestResult {
    let config: DaemonConfig = serde_json::from_str(r#"{ "capacity": 8 }"#)?;
    assert_eq!(config.capacity, 8);
    assert_eq!(config.thread_name, DaemonConfig::default().thread_name);
    assert_eq!(config.stack_size, None);
    config.validate()?;

    let empty: DaemonConfig = serde_json::from_str("{}")?;
    assert_eq!(empty, DaemonConfig::default());
    Ok(())
}

#[test]
fn test_loaded_config_is_validated_at_start() -> TestResult {
    let config: DaemonConfig = serde_json::from_str(r#"{ "capacity": 0 }"#)?;
    let err = must_err(DaemonTimerService::start(config));
    assert!(matches!(err, DaemonError::InvalidConfiguration(_)));
    Ok(())
}

#[test]
fn test_capacity_limits() {
    assert!(DaemonConfig::builder().capacity(1).build().is_ok());
    assert!(DaemonConfig::builder().capacity(MAX_CAPACITY).build().is_ok());
    assert!(DaemonConfig::builder().capacity(MAX_CAPACITY + 1).build().is_err());
}

#[test]
fn test_stack_size_floor() {
    assert!(DaemonConfig::builder().stack_size(MIN_STACK_SIZE).build().is_ok());
    assert!(DaemonConfig::builder().stack_size(MIN_STACK_SIZE - 1).build().is_err());
}

#[test]
fn test_started_service_reports_configured_capacity() -> TestResult {
    let service = DaemonTimerService::start(DaemonConfig::builder().capacity(3).build()?)?;
    let stats = service.stats();
    assert_eq!(stats.capacity, 3);
    assert_eq!(stats.live, 0);
    assert!(stats.running);
    Ok(())
}

#[test]
fn test_error_messages() {
    insta::assert_snapshot!(
        must_err(DaemonConfig::builder().capacity(0).build()),
        @"Invalid configuration: capacity must be greater than 0"
    );
    insta::assert_snapshot!(
        must_err(DaemonConfig::builder().capacity(MAX_CAPACITY + 1).build()),
        @"Invalid configuration: capacity must not exceed 4096"
    );
    insta::assert_snapshot!(DaemonError::DaemonPanicked, @"Timer daemon thread panicked");
}

mod props {
    use proptest::prelude::*;
    use ticker_daemon::{DaemonConfig, MAX_CAPACITY};

    proptest! {
        #[test]
        fn prop_capacity_accepted_iff_in_range(capacity in 0usize..MAX_CAPACITY * 2) {
            let accepted = DaemonConfig::builder().capacity(capacity).build().is_ok();
            prop_assert_eq!(accepted, (1..=MAX_CAPACITY).contains(&capacity));
        }

        #[test]
        fn prop_valid_config_survives_json(capacity in 1usize..=MAX_CAPACITY, name in "[a-z][a-z0-9-]{0,15}") {
            let config = DaemonConfig { capacity, thread_name: name, stack_size: None };
            prop_assert!(config.validate().is_ok());
            let json = serde_json::to_string(&config).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let decoded: DaemonConfig = serde_json::from_str(&json).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(decoded, config);
        }
    }
}
