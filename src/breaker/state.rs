//! Circuit state machine data.
//!
//! # Responsibilities
//! - Define the three circuit states (Closed, Open, HalfOpen)
//! - Define the persisted per-service state record
//! - Provide epoch-millisecond timestamps for window/recovery math

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Circuit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    /// Normal operation; calls pass through and are observed.
    Closed,
    /// Calls are rejected without being attempted.
    Open,
    /// Trial state; calls are let through to test recovery.
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted breaker state, one record per service name.
///
/// Serialized as JSON into the state store. Timestamps are epoch
/// milliseconds so the record stays meaningful across processes;
/// `Instant` would not survive serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakerState {
    /// Current circuit state.
    pub state: CircuitState,
    /// Failure count since the current window started.
    pub failures: u32,
    /// Consecutive successes while half-open; zero in any other state.
    pub successes: u32,
    /// Epoch ms of the most recent recorded failure.
    pub last_failure_ms: u64,
    /// Epoch ms before which open-state calls are rejected.
    /// Meaningful only while open.
    pub next_attempt_ms: u64,
}

impl Default for BreakerState {
    fn default() -> Self {
        Self {
            state: CircuitState::Closed,
            failures: 0,
            successes: 0,
            last_failure_ms: 0,
            next_attempt_ms: 0,
        }
    }
}

impl BreakerState {
    /// Whether `now` falls outside the failure-counting window.
    ///
    /// Stale failures outside the window do not count toward the
    /// threshold; the counter restarts from zero. This is a window-reset
    /// policy, not a sliding window of timestamps.
    pub fn window_expired(&self, now_ms: u64, window_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_failure_ms) > window_ms
    }
}

/// Current time as epoch milliseconds.
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
