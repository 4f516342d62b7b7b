//! Liveness probe, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub environment: &'static str,
    pub database: bool,
    /// Whether the public disk directory for uploads exists.
    pub storage: bool,
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = salon_db::health_check(&state.pool).await.is_ok();
    let storage = tokio::fs::metadata(state.storage.root())
        .await
        .is_ok_and(|m| m.is_dir());

    let healthy = database && storage;
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            environment: state.config.environment.as_str(),
            database,
            storage,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
