//! Breaker error taxonomy.

use thiserror::Error;

use crate::breaker::state::CircuitState;

/// Errors surfaced to callers of [`execute`](crate::breaker::CircuitBreaker::execute).
///
/// Every failed call resolves to exactly one of these kinds. The breaker
/// never suppresses or retries; `Inner` carries the operation's own error
/// unmodified.
#[derive(Debug, Error)]
pub enum BreakerError<E> {
    /// Rejected without invoking the operation: the circuit is open and
    /// the recovery window has not elapsed.
    #[error("service '{service}' unavailable: circuit is {state}")]
    Open {
        service: String,
        state: CircuitState,
    },

    /// The per-call timeout elapsed before the operation settled. Counted
    /// as a failure; the operation's eventual result is discarded.
    #[error("call to '{service}' timed out after {timeout_ms} ms")]
    Timeout { service: String, timeout_ms: u64 },

    /// The operation's own error, passed through unmodified. Counted as a
    /// failure.
    #[error(transparent)]
    Inner(E),
}

impl<E> BreakerError<E> {
    /// True for the fail-fast rejection raised while the circuit is open.
    pub fn is_open(&self) -> bool {
        matches!(self, BreakerError::Open { .. })
    }

    /// True when the per-call timeout fired.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BreakerError::Timeout { .. })
    }
}
