//! In-process fallback store.

use dashmap::DashMap;
use std::sync::Arc;

use crate::breaker::state::BreakerState;

/// A thread-safe in-memory map of breaker states, keyed by service name.
///
/// Used when the shared store is unconfigured or unreachable. State held
/// here is visible only to this process; in a multi-instance deployment
/// each instance tracks failures independently while degraded.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, BreakerState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<BreakerState> {
        self.inner.get(name).map(|r| r.value().clone())
    }

    pub fn set(&self, name: &str, state: &BreakerState) {
        self.inner.insert(name.to_string(), state.clone());
    }

    /// Number of tracked services.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
