use crate::utils::error::Result;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use tokio::net::TcpListener;

pub const LIVENESS_TEXT: &str = "Bot is running!";

#[derive(Debug, Clone)]
pub struct LivenessState {
    started_at: DateTime<Utc>,
}

impl LivenessState {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
        }
    }
}

impl Default for LivenessState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
}

pub fn router(state: LivenessState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
}

async fn root() -> &'static str {
    LIVENESS_TEXT
}

async fn health(State(state): State<LivenessState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        started_at: state.started_at,
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// Serves the uptime endpoints until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: LivenessState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("🌐 Liveness endpoint listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
