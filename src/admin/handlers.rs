use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::admin::AdminState;
use crate::breaker::{BreakerState, CircuitState};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub breakers: usize,
}

/// One breaker's current state, as shown on dashboards.
#[derive(Serialize)]
pub struct BreakerStatus {
    pub name: String,
    pub state: CircuitState,
    pub failures: u32,
    pub successes: u32,
    pub last_failure_ms: u64,
    pub next_attempt_ms: u64,
}

impl BreakerStatus {
    fn new(name: String, state: BreakerState) -> Self {
        Self {
            name,
            state: state.state,
            failures: state.failures,
            successes: state.successes,
            last_failure_ms: state.last_failure_ms,
            next_attempt_ms: state.next_attempt_ms,
        }
    }
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        breakers: state.registry.names().len(),
    })
}

pub async fn list_breakers(State(state): State<AdminState>) -> Json<Vec<BreakerStatus>> {
    let mut statuses = Vec::new();
    for (name, breaker_state) in state.registry.states().await {
        statuses.push(BreakerStatus::new(name, breaker_state));
    }
    Json(statuses)
}

pub async fn get_breaker(
    State(state): State<AdminState>,
    Path(name): Path<String>,
) -> Result<Json<BreakerStatus>, StatusCode> {
    match state.registry.state(&name).await {
        Some(breaker_state) => Ok(Json(BreakerStatus::new(name, breaker_state))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn reset_breaker(
    State(state): State<AdminState>,
    Path(name): Path<String>,
) -> Result<Json<BreakerStatus>, StatusCode> {
    if !state.registry.reset(&name).await {
        return Err(StatusCode::NOT_FOUND);
    }

    tracing::info!(service = %name, "Breaker reset via admin API");
    match state.registry.state(&name).await {
        Some(breaker_state) => Ok(Json(BreakerStatus::new(name, breaker_state))),
        None => Err(StatusCode::NOT_FOUND),
    }
}
