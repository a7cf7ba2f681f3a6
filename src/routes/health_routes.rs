use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::clients::BddHealth;
use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/bdd", get(bdd_health))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// 503 si el servicio BDD no responde bien
async fn bdd_health(State(state): State<AppState>) -> (StatusCode, Json<BddHealth>) {
    let report = state.bdd.health().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
