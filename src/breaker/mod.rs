//! Circuit breaker core.
//!
//! # States
//! - Closed: normal operation, calls pass through and are observed
//! - Open: service assumed down, calls fail fast
//! - HalfOpen: testing whether the service recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: failures reach threshold within the failure window
//! Open → HalfOpen: first call after the recovery timeout elapses
//! HalfOpen → Closed: successes reach the success threshold
//! HalfOpen → Open: any failure (new recovery window)
//! ```
//!
//! # Design Decisions
//! - Per-service breaker state, persisted in a shared store
//! - Fail fast while open: no state write, no waiting out a timeout
//! - Recovery is lazy; whichever caller arrives after the recovery
//!   timeout performs the half-open probe

pub mod engine;
pub mod error;
pub mod state;

pub use engine::CircuitBreaker;
pub use error::BreakerError;
pub use state::{BreakerState, CircuitState};
