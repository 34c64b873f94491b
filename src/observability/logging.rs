//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with an env-filter.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to this
/// crate. Intended for binaries and tests; library embedders usually
/// bring their own subscriber, in which case this must not be called.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tripswitch={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
