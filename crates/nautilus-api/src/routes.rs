use crate::handlers;
use crate::state::ApiState;
use axum::routing::{get, post};
use axum::Router;

/// HTTP surface of the intake service
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/dht-sensor", post(handlers::receive_dht_data))
        .route("/navigation", post(handlers::receive_navigation_data))
        .route("/mapping", post(handlers::receive_mapping_data))
        .route("/general-sensor", post(handlers::receive_general_sensor_data))
        .route("/batch-data", post(handlers::receive_batch_data))
        .route("/data/stats", get(handlers::get_database_stats))
        .route("/data/:kind", get(handlers::get_recent_data))
        .with_state(state)
}
