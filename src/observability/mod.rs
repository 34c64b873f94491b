//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! engine + store + registry produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout, remote)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Every transition and fail-fast rejection is logged with the service
//!   name and relevant counters
//! - Metric updates are cheap and never fail a call
//! - The host application decides where logs and metrics go; this module
//!   only provides initialization helpers

pub mod logging;
pub mod metrics;

use crate::config::ObservabilityConfig;

/// Initialize logging and metrics from configuration.
///
/// Default wiring for binaries; embedders with their own subscriber or
/// metrics recorder should wire the pieces individually instead.
pub fn init(config: &ObservabilityConfig) {
    logging::init(&config.log_level);

    if config.metrics_enabled {
        match config.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }
}
