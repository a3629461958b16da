use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::kernel::ServerDeps;

const STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    storage: StorageHealth,
}

#[derive(Serialize)]
pub struct StorageHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Returns 200 OK if the request store answers within five seconds, 503
/// Service Unavailable otherwise.
pub async fn health_handler(
    Extension(deps): Extension<ServerDeps>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage = match tokio::time::timeout(STORAGE_TIMEOUT, deps.requests.health_check()).await {
        Ok(Ok(())) => StorageHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => StorageHealth {
            status: "error".to_string(),
            error: Some(format!("Query failed: {}", e)),
        },
        Err(_) => StorageHealth {
            status: "error".to_string(),
            error: Some("Query timeout (>5s)".to_string()),
        },
    };

    let is_healthy = storage.status == "ok";
    let (status_code, overall) = if is_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall.to_string(),
            storage,
        }),
    )
}
