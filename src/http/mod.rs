use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod admin;
mod intake;
pub mod pages;

pub fn router(state: AppState) -> Router {
    let intake_router = intake::router().with_state(state.clone());
    let admin_router = admin::router().with_state(state.clone());
    Router::new()
        .route("/health", get(health_live))
        .nest("/admin", admin_router)
        .merge(intake_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe: succeeds whenever the process is up, regardless of
/// database or notifier health.
async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    assert!(
        uptime <= 31_536_000,
        "Uptime exceeds one year without restart"
    );
    Json(HealthResponse {
        status: "live",
        uptime_seconds: uptime,
    })
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
}
