//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! breaker subsystem. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the breaker subsystem.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BreakerSettings {
    /// Shared state store settings.
    pub store: StoreConfig,

    /// Per-service breaker definitions, one per protected external
    /// service.
    pub services: Vec<BreakerConfig>,

    /// Administrative API settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Per-service breaker configuration. Immutable after construction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BreakerConfig {
    /// Unique service identifier; also the state-store key namespace.
    pub name: String,

    /// Failures within the window that open the circuit.
    pub failure_threshold: u32,

    /// Span over which failures are counted, in milliseconds.
    #[serde(default = "default_failure_window_ms")]
    pub failure_window_ms: u64,

    /// Minimum open duration before a probe is allowed, in milliseconds.
    #[serde(default = "default_recovery_timeout_ms")]
    pub recovery_timeout_ms: u64,

    /// Consecutive half-open successes required to close.
    #[serde(default = "default_success_threshold")]
    pub success_threshold: u32,

    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_failure_window_ms() -> u64 {
    60_000
}

fn default_recovery_timeout_ms() -> u64 {
    30_000
}

fn default_success_threshold() -> u32 {
    3
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl BreakerConfig {
    /// A config carrying the documented defaults for everything but the
    /// name and failure threshold.
    pub fn new(name: impl Into<String>, failure_threshold: u32) -> Self {
        Self {
            name: name.into(),
            failure_threshold,
            failure_window_ms: default_failure_window_ms(),
            recovery_timeout_ms: default_recovery_timeout_ms(),
            success_threshold: default_success_threshold(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Shared state store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Connection URL for the shared store (e.g., "redis://localhost/").
    /// Absent means in-memory state only.
    pub redis_url: Option<String>,

    /// Retention for state records in seconds.
    pub ttl_secs: u64,

    /// Per-operation store timeout in milliseconds.
    pub op_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            ttl_secs: 86_400,
            op_timeout_ms: 2_000,
        }
    }
}

/// Administrative API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin router.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Address the host application serves the admin router on.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
