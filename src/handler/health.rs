use crate::app::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::{error, info};

/// Handler for GET /v1/health
pub async fn health_handler() -> &'static str {
    info!("Health check requested");
    "Healthy"
}

/// Handler for GET /test (legacy liveness probe)
pub async fn test_probe_handler() -> &'static str {
    "Service is running!"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthReport {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// Handler for GET /v1/ready: succeeds only while the feed-size store answers.
pub async fn ready_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthReport>, (StatusCode, Json<HealthReport>)> {
    if let Err(e) = state.assigner().store_ready().await {
        error!(error = %e, "feed-size store readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthReport {
                status: "degraded",
                detail: Some(format!("feed_size_store: {e}")),
            }),
        ));
    }

    Ok(Json(HealthReport {
        status: "ready",
        detail: None,
    }))
}
