//! Redis-backed shared state store.
//!
//! # Responsibilities
//! - Connect to the shared key-value store
//! - Read/write JSON-encoded breaker state under the `breaker:` namespace
//! - Enforce a per-operation timeout so a slow store cannot stall callers
//! - Expire entries after a fixed retention as a safety net

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

use crate::breaker::state::BreakerState;

/// Errors from the shared store. Never surfaced to `execute` callers;
/// the adapter degrades to the in-memory map instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("state encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key namespace for breaker state records.
fn state_key(name: &str) -> String {
    format!("breaker:{}", name)
}

/// Client wrapper around the shared Redis store.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisStore {
    /// Connect to the store at `url`.
    ///
    /// The connection manager reconnects on its own after transient
    /// errors, so a single successful connect is enough for the process
    /// lifetime.
    pub async fn connect(url: &str, op_timeout: Duration) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = timeout(op_timeout, client.get_connection_manager())
            .await
            .map_err(|_| StoreError::Timeout(op_timeout))??;

        tracing::info!(url = %url, "Connected to shared state store");
        Ok(Self { conn, op_timeout })
    }

    pub async fn get(&self, name: &str) -> Result<Option<BreakerState>, StoreError> {
        let mut conn = self.conn.clone();
        let key = state_key(name);

        let raw: Option<String> = timeout(self.op_timeout, conn.get(&key))
            .await
            .map_err(|_| StoreError::Timeout(self.op_timeout))??;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn set(
        &self,
        name: &str,
        state: &BreakerState,
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let key = state_key(name);
        let json = serde_json::to_string(state)?;

        timeout(self.op_timeout, conn.set_ex::<_, _, ()>(&key, json, ttl_secs))
            .await
            .map_err(|_| StoreError::Timeout(self.op_timeout))??;

        Ok(())
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("op_timeout", &self.op_timeout)
            .finish()
    }
}
