//! Breaker engine: state machine decisions and the timeout race.
//!
//! # Responsibilities
//! - Wrap an arbitrary async operation with the circuit decision
//! - Race the operation against the configured per-call timeout
//! - Record successes/failures and persist the resulting state
//!
//! # Design Decisions
//! - All transitions are evaluated lazily at call time; no background
//!   timer wakes an idle breaker
//! - The fail-fast path performs no state write, keeping rejected calls
//!   cheap while the circuit is open
//! - State is read, decided on, and written back without cross-process
//!   locking; concurrent probes on recovery and lost counter updates are
//!   accepted trade-offs, biasing toward staying closed

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::breaker::error::BreakerError;
use crate::breaker::state::{now_ms, BreakerState, CircuitState};
use crate::config::BreakerConfig;
use crate::observability::metrics;
use crate::store::StateStore;

/// A circuit breaker guarding one external service.
///
/// Construction is cheap and configuration is immutable afterward, so a
/// breaker is shared via `Arc` and needs no locking of its own; the only
/// mutable state is the per-service record in the [`StateStore`].
pub struct CircuitBreaker {
    config: BreakerConfig,
    store: StateStore,
}

impl CircuitBreaker {
    pub fn new(config: BreakerConfig, store: StateStore) -> Self {
        Self { config, store }
    }

    /// The service name this breaker protects.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Execute `operation` under the breaker.
    ///
    /// Either invokes the operation under the per-call timeout and
    /// returns its result (recording the outcome), or fails fast with
    /// [`BreakerError::Open`] without invoking it when the circuit is
    /// open and the recovery window has not elapsed.
    ///
    /// The timeout cancels the logical wait: the operation's future is
    /// dropped, and work already delegated elsewhere (a spawned task, the
    /// remote service itself) runs on with its eventual outcome
    /// discarded. Callers must not depend on anything settled after the
    /// race resolves.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut state = self.read_state().await;
        let now = now_ms();

        if state.state == CircuitState::Open {
            if now < state.next_attempt_ms {
                tracing::debug!(
                    service = %self.config.name,
                    failures = state.failures,
                    next_attempt_ms = state.next_attempt_ms,
                    "Rejecting call: circuit open"
                );
                metrics::record_call(&self.config.name, "rejected");
                return Err(BreakerError::Open {
                    service: self.config.name.clone(),
                    state: state.state,
                });
            }

            // Recovery window elapsed; this caller probes the service.
            state.state = CircuitState::HalfOpen;
            state.successes = 0;
            self.store.set(&self.config.name, &state).await;
            tracing::info!(
                service = %self.config.name,
                "Circuit half-open, probing for recovery"
            );
            metrics::record_transition(&self.config.name, CircuitState::HalfOpen);
        }

        let per_call = Duration::from_millis(self.config.timeout_ms);
        match timeout(per_call, operation()).await {
            Ok(Ok(value)) => {
                self.record_success(state).await;
                metrics::record_call(&self.config.name, "success");
                Ok(value)
            }
            Ok(Err(e)) => {
                self.record_failure(state).await;
                metrics::record_call(&self.config.name, "failure");
                Err(BreakerError::Inner(e))
            }
            Err(_) => {
                self.record_failure(state).await;
                metrics::record_call(&self.config.name, "timeout");
                tracing::warn!(
                    service = %self.config.name,
                    timeout_ms = self.config.timeout_ms,
                    "Call timed out"
                );
                Err(BreakerError::Timeout {
                    service: self.config.name.clone(),
                    timeout_ms: self.config.timeout_ms,
                })
            }
        }
    }

    /// Read-only view of the current state record.
    pub async fn current_state(&self) -> BreakerState {
        self.read_state().await
    }

    /// Force the breaker back to the closed default regardless of current
    /// state. For operator use once the downstream service is known to
    /// have recovered.
    pub async fn reset(&self) {
        let state = BreakerState::default();
        self.store.set(&self.config.name, &state).await;
        tracing::info!(service = %self.config.name, "Circuit manually reset to closed");
        metrics::record_transition(&self.config.name, CircuitState::Closed);
    }

    /// Read the record for this service, creating the closed default
    /// lazily when absent.
    async fn read_state(&self) -> BreakerState {
        self.store
            .get(&self.config.name)
            .await
            .unwrap_or_default()
    }

    async fn record_success(&self, mut state: BreakerState) {
        match state.state {
            CircuitState::HalfOpen => {
                state.successes += 1;
                if state.successes >= self.config.success_threshold {
                    state = BreakerState::default();
                    tracing::info!(
                        service = %self.config.name,
                        "Circuit closed after successful recovery"
                    );
                    metrics::record_transition(&self.config.name, CircuitState::Closed);
                }
                self.store.set(&self.config.name, &state).await;
            }
            CircuitState::Closed if state.failures > 0 => {
                // A success clears the accumulated count entirely; this is
                // a full reset, not a sliding window.
                state.failures = 0;
                self.store.set(&self.config.name, &state).await;
            }
            // Closed with no failures: nothing to write.
            _ => {}
        }
    }

    async fn record_failure(&self, mut state: BreakerState) {
        let now = now_ms();
        if state.window_expired(now, self.config.failure_window_ms) {
            state.failures = 0;
        }
        state.failures += 1;
        state.last_failure_ms = now;

        let reopening = state.state == CircuitState::HalfOpen;
        if reopening || state.failures >= self.config.failure_threshold {
            state.state = CircuitState::Open;
            state.successes = 0;
            state.next_attempt_ms = now + self.config.recovery_timeout_ms;
            tracing::warn!(
                service = %self.config.name,
                failures = state.failures,
                next_attempt_ms = state.next_attempt_ms,
                reopening,
                "Circuit opened"
            );
            metrics::record_transition(&self.config.name, CircuitState::Open);
        }

        self.store.set(&self.config.name, &state).await;
    }
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.config.name)
            .field("failure_threshold", &self.config.failure_threshold)
            .field("timeout_ms", &self.config.timeout_ms)
            .finish()
    }
}
