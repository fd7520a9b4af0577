//! HTTP routes exposed by the connector.

pub mod query;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::state::ServerState;

/// Create a router with every route registered.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/query", get(query::get_query).post(query::post_query))
        .route("/health", get(get_health))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

/// Liveness probe.
async fn get_health() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Prometheus text exposition of the metrics registry.
async fn get_metrics(State(state): State<ServerState>) -> Result<String, StatusCode> {
    let encoder = prometheus::TextEncoder::new();
    encoder
        .encode_to_string(&state.metrics_registry.gather())
        .map_err(|err| {
            tracing::error!("error encoding metrics: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
