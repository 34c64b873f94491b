//! Metrics collection and exposition.
//!
//! # Metrics
//! - `breaker_calls_total` (counter): calls by service and outcome
//!   (success, failure, timeout, rejected)
//! - `breaker_transitions_total` (counter): state transitions by service
//!   and target state
//! - `breaker_state` (gauge): current state per service
//!   (0=closed, 1=open, 2=half_open)
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; a host application that
//!   installs no recorder pays almost nothing
//! - `init_metrics` installs a Prometheus exporter for hosts that want
//!   the endpoint without wiring their own recorder

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

use crate::breaker::CircuitState;

/// Record one call outcome for a service.
pub fn record_call(service: &str, outcome: &'static str) {
    counter!(
        "breaker_calls_total",
        "service" => service.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a state transition and update the state gauge.
pub fn record_transition(service: &str, to: CircuitState) {
    counter!(
        "breaker_transitions_total",
        "service" => service.to_string(),
        "to" => to.as_str()
    )
    .increment(1);

    let value = match to {
        CircuitState::Closed => 0.0,
        CircuitState::Open => 1.0,
        CircuitState::HalfOpen => 2.0,
    };
    gauge!("breaker_state", "service" => service.to_string()).set(value);
}

/// Install the Prometheus exporter on `addr`.
///
/// Failure to install is logged, never propagated; metrics are an
/// operational convenience, not a prerequisite for protecting calls.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}
