//! Breaker registry.
//!
//! # Responsibilities
//! - Hold the fixed set of named breakers, one per protected service
//! - Resolve breakers by name for ad-hoc wrapping of arbitrary functions
//! - Expose manual reset and read-only state queries for operations
//!
//! # Design Decisions
//! - Built once at startup from configuration and injected where needed;
//!   there is no module-level singleton, keeping initialization order and
//!   testability explicit
//! - The set of breakers is fixed for the process lifetime; per-service
//!   thresholds are tuned in configuration, not at runtime

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::breaker::{BreakerError, BreakerState, CircuitBreaker};
use crate::config::{BreakerConfig, BreakerSettings};
use crate::store::StateStore;

/// A fixed table of named breaker instances sharing one state store.
pub struct BreakerRegistry {
    breakers: HashMap<String, Arc<CircuitBreaker>>,
}

impl BreakerRegistry {
    /// Build the registry from per-service configs and a connected store.
    pub fn new(services: Vec<BreakerConfig>, store: StateStore) -> Self {
        let mut breakers = HashMap::new();
        for config in services {
            let name = config.name.clone();
            if breakers
                .insert(
                    name.clone(),
                    Arc::new(CircuitBreaker::new(config, store.clone())),
                )
                .is_some()
            {
                tracing::warn!(service = %name, "Duplicate breaker definition, keeping the last");
            }
        }

        tracing::info!(breakers = breakers.len(), "Breaker registry initialized");
        Self { breakers }
    }

    /// Connect the state store and build the registry from settings.
    pub async fn from_settings(settings: &BreakerSettings) -> Self {
        let store = StateStore::connect(&settings.store).await;
        Self::new(settings.services.clone(), store)
    }

    /// Look up a breaker by service name.
    pub fn get(&self, name: &str) -> Option<Arc<CircuitBreaker>> {
        self.breakers.get(name).cloned()
    }

    /// Configured service names, sorted for stable listings.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.breakers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Current state of one breaker, or `None` for an unknown name.
    pub async fn state(&self, name: &str) -> Option<BreakerState> {
        match self.breakers.get(name) {
            Some(breaker) => Some(breaker.current_state().await),
            None => None,
        }
    }

    /// Current state of every breaker, for dashboards and health checks.
    pub async fn states(&self) -> Vec<(String, BreakerState)> {
        let mut all = Vec::with_capacity(self.breakers.len());
        for name in self.names() {
            if let Some(breaker) = self.breakers.get(name) {
                all.push((name.to_string(), breaker.current_state().await));
            }
        }
        all
    }

    /// Force a named breaker back to the closed default. Returns false
    /// for an unknown name.
    pub async fn reset(&self, name: &str) -> bool {
        match self.breakers.get(name) {
            Some(breaker) => {
                breaker.reset().await;
                true
            }
            None => false,
        }
    }

    /// Wrap an async function so every call runs under the named breaker,
    /// preserving the function's argument and return shape. Multiple
    /// arguments are passed as a tuple; zero-argument functions take `()`.
    ///
    /// Returns `None` for an unknown name.
    pub fn wrap<F>(&self, name: &str, f: F) -> Option<Guarded<F>> {
        self.get(name).map(|breaker| Guarded { breaker, inner: f })
    }
}

impl std::fmt::Debug for BreakerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreakerRegistry")
            .field("breakers", &self.names())
            .finish()
    }
}

/// An async function adapted to run under a named breaker.
///
/// Created by [`BreakerRegistry::wrap`]. The wrapped function is only
/// invoked when the breaker allows the call.
pub struct Guarded<F> {
    breaker: Arc<CircuitBreaker>,
    inner: F,
}

impl<F> Guarded<F> {
    /// Invoke the wrapped function with `args` under the breaker.
    pub async fn call<A, Fut, T, E>(&self, args: A) -> Result<T, BreakerError<E>>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.breaker.execute(|| (self.inner)(args)).await
    }

    /// The breaker guarding this function.
    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaker::CircuitState;

    fn registry() -> BreakerRegistry {
        BreakerRegistry::new(
            vec![
                BreakerConfig::new("crm", 3),
                BreakerConfig::new("warehouse", 5),
            ],
            StateStore::in_memory(),
        )
    }

    #[test]
    fn lookup_by_name() {
        let registry = registry();
        assert!(registry.get("crm").is_some());
        assert!(registry.get("unknown").is_none());
        assert_eq!(registry.names(), vec!["crm", "warehouse"]);
    }

    #[tokio::test]
    async fn state_query_defaults_to_closed() {
        let registry = registry();
        let state = registry.state("crm").await.unwrap();
        assert_eq!(state.state, CircuitState::Closed);
        assert!(registry.state("unknown").await.is_none());
    }

    #[tokio::test]
    async fn reset_unknown_name_reports_false() {
        let registry = registry();
        assert!(registry.reset("crm").await);
        assert!(!registry.reset("unknown").await);
    }

    #[tokio::test]
    async fn wrap_preserves_argument_and_return_shape() {
        let registry = registry();
        let guarded = registry
            .wrap("crm", |(a, b): (u32, u32)| async move {
                Ok::<_, std::io::Error>(a + b)
            })
            .unwrap();

        let sum = guarded.call((2, 3)).await.unwrap();
        assert_eq!(sum, 5);
    }

    #[tokio::test]
    async fn wrapped_calls_share_the_named_breaker_state() {
        let registry = registry();
        let guarded = registry
            .wrap("crm", |_: ()| async move { Err::<(), _>("down".to_string()) })
            .unwrap();

        for _ in 0..3 {
            let _ = guarded.call(()).await;
        }
        let state = registry.state("crm").await.unwrap();
        assert_eq!(state.state, CircuitState::Open);
    }
}
