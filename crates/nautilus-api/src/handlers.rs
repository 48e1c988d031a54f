use crate::error::ApiError;
use crate::responses::{
    Banner, BatchIngestResponse, HealthResponse, IngestResponse, QueryResponse, StatsResponse,
};
use crate::state::ApiState;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use nautilus_domain::{
    BatchReading, DataKind, EnvironmentalReading, GeneralReading, MappingReading,
    NavigationReading, QueryInput, TelemetryRecord,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

const ENDPOINTS: &[&str] = &[
    "/dht-sensor",
    "/navigation",
    "/mapping",
    "/general-sensor",
    "/batch-data",
    "/health",
];

pub async fn root() -> Json<Banner> {
    Json(Banner {
        message: "Nautilus telemetry intake API",
        status: "active",
        endpoints: ENDPOINTS,
    })
}

pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        database_connected: state.store.is_connected().await,
    })
}

pub async fn receive_dht_data(
    State(state): State<ApiState>,
    Json(reading): Json<EnvironmentalReading>,
) -> Result<Json<IngestResponse>, ApiError> {
    let receipt = state
        .ingest
        .ingest(TelemetryRecord::Environmental(reading))
        .await?;
    Ok(Json(IngestResponse::from_receipt(&receipt)))
}

pub async fn receive_navigation_data(
    State(state): State<ApiState>,
    Json(reading): Json<NavigationReading>,
) -> Result<Json<IngestResponse>, ApiError> {
    let receipt = state
        .ingest
        .ingest(TelemetryRecord::Navigation(reading))
        .await?;
    Ok(Json(IngestResponse::from_receipt(&receipt)))
}

pub async fn receive_mapping_data(
    State(state): State<ApiState>,
    Json(reading): Json<MappingReading>,
) -> Result<Json<IngestResponse>, ApiError> {
    let receipt = state
        .ingest
        .ingest(TelemetryRecord::Mapping(reading))
        .await?;
    Ok(Json(IngestResponse::from_receipt(&receipt)))
}

pub async fn receive_general_sensor_data(
    State(state): State<ApiState>,
    Json(reading): Json<GeneralReading>,
) -> Result<Json<IngestResponse>, ApiError> {
    let receipt = state
        .ingest
        .ingest(TelemetryRecord::General(reading))
        .await?;
    Ok(Json(IngestResponse::from_receipt(&receipt)))
}

pub async fn receive_batch_data(
    State(state): State<ApiState>,
    Json(points): Json<Vec<Map<String, Value>>>,
) -> Result<Json<BatchIngestResponse>, ApiError> {
    let count = points.len();
    debug!(points = count, "batch payload received");
    let receipt = state
        .ingest
        .ingest(TelemetryRecord::Batch(BatchReading::new(points)))
        .await?;
    Ok(Json(BatchIngestResponse::from_receipt(&receipt, count)))
}

#[derive(Debug, Deserialize)]
pub struct DataQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub sensor_id: Option<String>,
    pub device_id: Option<String>,
}

fn default_limit() -> i64 {
    10
}

/// Path segments exposed for retrieval; batch and general readings have no
/// query endpoint
fn queryable_kind(segment: &str) -> Option<DataKind> {
    match segment {
        "dht-sensor" => Some(DataKind::Environmental),
        "navigation" => Some(DataKind::Navigation),
        "mapping" => Some(DataKind::Mapping),
        _ => None,
    }
}

pub async fn get_recent_data(
    State(state): State<ApiState>,
    Path(segment): Path<String>,
    Query(params): Query<DataQuery>,
) -> Result<Json<QueryResponse>, ApiError> {
    let kind = queryable_kind(&segment).ok_or(ApiError::UnknownDataKind(segment))?;
    debug!(kind = kind.stats_key(), limit = params.limit, "data query received");

    let filter_value = match kind {
        DataKind::Navigation => params.device_id,
        _ => params.sensor_id,
    };

    let data = state
        .query
        .recent(QueryInput {
            kind,
            filter_value,
            limit: params.limit,
        })
        .await?;

    Ok(Json(QueryResponse {
        status: "success",
        count: data.len(),
        data,
    }))
}

pub async fn get_database_stats(
    State(state): State<ApiState>,
) -> Result<Json<StatsResponse>, ApiError> {
    let collections = state.stats.collection_counts().await?;
    Ok(Json(StatsResponse {
        status: "success",
        database: state.database_name.clone(),
        collections,
    }))
}
