//! State machine tests for the breaker engine.
//!
//! Thresholds and timings are scaled down so recovery windows elapse in
//! milliseconds; the transition rules under test are time-scale
//! independent.

use std::time::Duration;

use tripswitch::{BreakerConfig, BreakerError, CircuitState};

mod common;
use common::{breaker, FlakyService};

fn fast_config(name: &str) -> BreakerConfig {
    let mut config = BreakerConfig::new(name, 3);
    config.recovery_timeout_ms = 300;
    config.timeout_ms = 1_000;
    config
}

#[tokio::test]
async fn threshold_opens_the_circuit() {
    let cb = breaker(fast_config("threshold"));
    let service = FlakyService::new(u32::MAX);

    for _ in 0..3 {
        let result = cb.execute(|| service.invoke()).await;
        assert!(matches!(result, Err(BreakerError::Inner(_))));
    }
    assert_eq!(cb.current_state().await.state, CircuitState::Open);
    assert_eq!(service.calls(), 3);

    // The fourth call fails fast without invoking the operation.
    let result = cb.execute(|| service.invoke()).await;
    match result {
        Err(BreakerError::Open { service: name, state }) => {
            assert_eq!(name, "threshold");
            assert_eq!(state, CircuitState::Open);
        }
        _ => panic!("expected fail-fast rejection"),
    }
    assert_eq!(service.calls(), 3);
}

#[tokio::test]
async fn window_reset_clears_stale_failures() {
    let mut config = BreakerConfig::new("window", 2);
    config.failure_window_ms = 200;
    let cb = breaker(config);
    let service = FlakyService::new(u32::MAX);

    let _ = cb.execute(|| service.invoke()).await;
    assert_eq!(cb.current_state().await.failures, 1);

    // Wait out the failure window; the old failure no longer counts.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let _ = cb.execute(|| service.invoke()).await;
    let state = cb.current_state().await;
    assert_eq!(state.state, CircuitState::Closed);
    assert_eq!(state.failures, 1);
}

#[tokio::test]
async fn open_rejects_until_recovery_timeout_elapses() {
    let mut config = fast_config("recovery");
    config.failure_threshold = 1;
    let cb = breaker(config);
    let service = FlakyService::new(1);

    let _ = cb.execute(|| service.invoke()).await;
    assert_eq!(cb.current_state().await.state, CircuitState::Open);
    assert_eq!(service.calls(), 1);

    // Before next_attempt_ms: rejected, operation not invoked.
    let result = cb.execute(|| service.invoke()).await;
    assert!(matches!(result, Err(BreakerError::Open { .. })));
    assert_eq!(service.calls(), 1);

    // After the recovery timeout the next call probes the service.
    tokio::time::sleep(Duration::from_millis(350)).await;
    let result = cb.execute(|| service.invoke()).await;
    assert_eq!(result.unwrap(), "ok");
    assert_eq!(service.calls(), 2);
    assert_eq!(cb.current_state().await.state, CircuitState::HalfOpen);
}

#[tokio::test]
async fn half_open_successes_close_the_circuit() {
    let mut config = fast_config("closing");
    config.failure_threshold = 1;
    config.success_threshold = 3;
    let cb = breaker(config);
    let service = FlakyService::new(1);

    let _ = cb.execute(|| service.invoke()).await;
    tokio::time::sleep(Duration::from_millis(350)).await;

    for expected in 1..=2u32 {
        let _ = cb.execute(|| service.invoke()).await.unwrap();
        let state = cb.current_state().await;
        assert_eq!(state.state, CircuitState::HalfOpen);
        assert_eq!(state.successes, expected);
    }

    let _ = cb.execute(|| service.invoke()).await.unwrap();
    let state = cb.current_state().await;
    assert_eq!(state.state, CircuitState::Closed);
    assert_eq!(state.failures, 0);
    assert_eq!(state.successes, 0);
}

#[tokio::test]
async fn half_open_failure_reopens_and_discards_progress() {
    let mut config = fast_config("reopening");
    config.failure_threshold = 1;
    config.success_threshold = 3;
    let cb = breaker(config);

    let _ = cb
        .execute(|| async { Err::<(), _>("down".to_string()) })
        .await;
    tokio::time::sleep(Duration::from_millis(350)).await;

    // One successful probe, then a failed one.
    let _ = cb.execute(|| async { Ok::<_, String>(()) }).await;
    assert_eq!(cb.current_state().await.successes, 1);

    let before = cb.current_state().await.next_attempt_ms;
    let _ = cb
        .execute(|| async { Err::<(), _>("still down".to_string()) })
        .await;

    let state = cb.current_state().await;
    assert_eq!(state.state, CircuitState::Open);
    assert_eq!(state.successes, 0);
    assert!(state.next_attempt_ms > before);
    assert!(state.next_attempt_ms > state.last_failure_ms);

    // Partial recovery progress is gone: the next call is rejected.
    let result = cb.execute(|| async { Ok::<_, String>(()) }).await;
    assert!(matches!(result, Err(BreakerError::Open { .. })));
}

#[tokio::test]
async fn timeout_counts_as_failure() {
    let mut config = BreakerConfig::new("slow", 2);
    config.timeout_ms = 100;
    let cb = breaker(config);

    let never_settles = || async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok::<_, String>("too late")
    };

    let result = cb.execute(never_settles).await;
    match result {
        Err(BreakerError::Timeout {
            service,
            timeout_ms,
        }) => {
            assert_eq!(service, "slow");
            assert_eq!(timeout_ms, 100);
        }
        _ => panic!("expected timeout error"),
    }
    assert_eq!(cb.current_state().await.failures, 1);

    // A second timeout reaches the threshold, same as thrown errors.
    let _ = cb.execute(never_settles).await;
    assert_eq!(cb.current_state().await.state, CircuitState::Open);
}

#[tokio::test]
async fn manual_reset_returns_to_closed_defaults() {
    let mut config = fast_config("resettable");
    config.failure_threshold = 1;
    let cb = breaker(config);
    let service = FlakyService::new(1);

    let _ = cb.execute(|| service.invoke()).await;
    assert_eq!(cb.current_state().await.state, CircuitState::Open);

    cb.reset().await;
    let state = cb.current_state().await;
    assert_eq!(state.state, CircuitState::Closed);
    assert_eq!(state.failures, 0);
    assert_eq!(state.successes, 0);

    // Observable on the very next call: the operation runs again.
    let result = cb.execute(|| service.invoke()).await;
    assert_eq!(result.unwrap(), "ok");
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn full_outage_and_recovery_cycle() {
    let mut config = BreakerConfig::new("cycle", 3);
    config.failure_window_ms = 60_000;
    config.recovery_timeout_ms = 300;
    config.success_threshold = 2;
    let cb = breaker(config);
    let service = FlakyService::new(3);

    // Three failures open the circuit.
    for _ in 0..3 {
        let _ = cb.execute(|| service.invoke()).await;
    }
    let state = cb.current_state().await;
    assert_eq!(state.state, CircuitState::Open);
    assert!(state.next_attempt_ms > state.last_failure_ms);

    // Within the recovery window: rejected without a call.
    let result = cb.execute(|| service.invoke()).await;
    assert!(matches!(result, Err(BreakerError::Open { .. })));
    assert_eq!(service.calls(), 3);

    // Past the window: probe succeeds, second success closes.
    tokio::time::sleep(Duration::from_millis(350)).await;
    cb.execute(|| service.invoke()).await.unwrap();
    assert_eq!(cb.current_state().await.state, CircuitState::HalfOpen);

    cb.execute(|| service.invoke()).await.unwrap();
    let state = cb.current_state().await;
    assert_eq!(state.state, CircuitState::Closed);
    assert_eq!(state.failures, 0);
}
