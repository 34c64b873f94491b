//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BreakerSettings (validated, immutable)
//!     → registry construction at startup
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; breaker thresholds never change
//!   at runtime
//! - All fields have defaults except service name and failure threshold
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AdminConfig;
pub use schema::BreakerConfig;
pub use schema::BreakerSettings;
pub use schema::ObservabilityConfig;
pub use schema::StoreConfig;
