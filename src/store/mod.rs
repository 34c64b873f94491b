//! Breaker state persistence.
//!
//! # Data Flow
//! ```text
//! engine read/write
//!     → StateStore (adapter)
//!         → redis.rs (shared store, authoritative when reachable)
//!         → memory.rs (process-local fallback)
//! ```
//!
//! # Design Decisions
//! - The shared store is authoritative when configured and reachable
//! - Absence of a store URL selects memory-only mode, never a startup error
//! - A store error degrades that operation to the in-memory map and logs;
//!   store trouble must never fail or block a protected call
//! - Entries expire after a fixed retention (24 h default) so state from
//!   decommissioned services does not linger

pub mod memory;
pub mod redis;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::breaker::state::BreakerState;
use crate::config::StoreConfig;
use self::memory::MemoryStore;
use self::redis::{RedisStore, StoreError};

/// State store adapter: shared Redis store with in-process fallback.
///
/// `get`/`set` never fail; degradation is logged and absorbed. Safe to
/// call concurrently from many tasks and many process instances.
#[derive(Clone, Debug)]
pub struct StateStore {
    shared: Option<RedisStore>,
    local: MemoryStore,
    ttl_secs: u64,
    /// Set while operating against the fallback map; used to log the
    /// degradation once per transition instead of per call.
    degraded: Arc<AtomicBool>,
}

impl StateStore {
    /// Build the adapter from configuration.
    ///
    /// A missing URL silently activates memory-only mode. A configured but
    /// unreachable store logs the failure and also starts in memory-only
    /// mode, keeping construction infallible.
    pub async fn connect(config: &StoreConfig) -> Self {
        let op_timeout = Duration::from_millis(config.op_timeout_ms);

        let shared = match &config.redis_url {
            Some(url) => match RedisStore::connect(url, op_timeout).await {
                Ok(store) => Some(store),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Shared state store unreachable; using in-memory state only"
                    );
                    None
                }
            },
            None => {
                tracing::info!("No shared state store configured; using in-memory state");
                None
            }
        };

        Self {
            shared,
            local: MemoryStore::new(),
            ttl_secs: config.ttl_secs,
            degraded: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A memory-only adapter, for tests and single-process embeddings.
    pub fn in_memory() -> Self {
        Self {
            shared: None,
            local: MemoryStore::new(),
            ttl_secs: 86_400,
            degraded: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether the shared store is configured.
    pub fn is_shared(&self) -> bool {
        self.shared.is_some()
    }

    /// Read the state record for `name`, if one exists.
    pub async fn get(&self, name: &str) -> Option<BreakerState> {
        if let Some(shared) = &self.shared {
            match shared.get(name).await {
                Ok(state) => {
                    self.mark_healthy();
                    return state;
                }
                Err(e) => self.mark_degraded("read", name, &e),
            }
        }
        self.local.get(name)
    }

    /// Write the state record for `name`.
    pub async fn set(&self, name: &str, state: &BreakerState) {
        if let Some(shared) = &self.shared {
            match shared.set(name, state, self.ttl_secs).await {
                Ok(()) => {
                    self.mark_healthy();
                    return;
                }
                Err(e) => self.mark_degraded("write", name, &e),
            }
        }
        self.local.set(name, state);
    }

    fn mark_degraded(&self, op: &str, name: &str, error: &StoreError) {
        if !self.degraded.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                service = %name,
                op = %op,
                error = %error,
                "Shared state store degraded; falling back to in-memory state"
            );
        } else {
            tracing::debug!(service = %name, op = %op, error = %error, "Store still degraded");
        }
    }

    fn mark_healthy(&self) {
        if self.degraded.swap(false, Ordering::Relaxed) {
            tracing::info!("Shared state store recovered");
        }
    }
}
