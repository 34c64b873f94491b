//! Distributed circuit breaker library.
//!
//! Protects calls to unreliable external services from cascading
//! failure. A breaker sits between caller code and an arbitrary async
//! operation: it observes success/failure/timeout and decides whether to
//! allow, probe, or short-circuit future attempts. Per-service state is
//! shared across process instances through a Redis-backed store, with an
//! in-process fallback when the store is unreachable.
//!
//! ```text
//! caller → CircuitBreaker::execute(operation)
//!             → StateStore read
//!             → state-machine decision
//!             → (optionally) operation raced against the per-call timeout
//!             → StateStore write
//!             → result or classified error
//! ```

pub mod admin;
pub mod breaker;
pub mod config;
pub mod observability;
pub mod registry;
pub mod store;

pub use breaker::{BreakerError, BreakerState, CircuitBreaker, CircuitState};
pub use config::{BreakerConfig, BreakerSettings};
pub use registry::BreakerRegistry;
pub use store::StateStore;
