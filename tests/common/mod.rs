//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;
use tripswitch::registry::BreakerRegistry;
use tripswitch::{BreakerConfig, CircuitBreaker, StateStore};

/// A protected operation that fails its first `fail_first` calls and
/// succeeds afterwards, counting every actual invocation.
#[derive(Clone)]
pub struct FlakyService {
    calls: Arc<AtomicU32>,
    fail_first: u32,
}

impl FlakyService {
    pub fn new(fail_first: u32) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            fail_first,
        }
    }

    /// Number of times the operation actually ran.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn invoke(&self) -> Result<&'static str, String> {
        let count = self.calls.fetch_add(1, Ordering::SeqCst);
        if count < self.fail_first {
            Err("service unavailable".to_string())
        } else {
            Ok("ok")
        }
    }
}

/// Build a breaker over a fresh in-memory store.
#[allow(dead_code)]
pub fn breaker(config: BreakerConfig) -> CircuitBreaker {
    CircuitBreaker::new(config, StateStore::in_memory())
}

/// Serve the admin router on an ephemeral port, returning its address.
#[allow(dead_code)]
pub async fn serve_admin(registry: Arc<BreakerRegistry>, api_key: &str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = tripswitch::admin::router(registry, api_key);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}
