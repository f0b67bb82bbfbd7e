use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::error::ApiResult;
use crate::main_lib::{AppState, StorageHandle};
use spendwise_storage_sqlite::db;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthStatus {
    status: &'static str,
    uptime_secs: u64,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DbStatus {
    success: bool,
    message: &'static str,
}

/// Liveness probe; also the target of the keep-alive self-ping.
async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "alive",
        uptime_secs: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Connectivity check against the active storage backend.
async fn get_db_health(State(state): State<Arc<AppState>>) -> ApiResult<Json<DbStatus>> {
    match &state.storage {
        StorageHandle::Sqlite(pool) => {
            db::db_ping(pool)?;
            Ok(Json(DbStatus {
                success: true,
                message: "Database connected successfully",
            }))
        }
        StorageHandle::Memory => Ok(Json(DbStatus {
            success: true,
            message: "Snapshot store active",
        })),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(get_health))
        .route("/health/db", get(get_db_health))
}
