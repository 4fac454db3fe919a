use std::time::Duration;
use thiserror::Error;

/// Default HTTP port for health checks
pub const DEFAULT_HTTP_PORT: u16 = 3000;

#[derive(Error, Debug)]
pub enum HealthcheckError {
    #[error("Healthcheck failed: could not create HTTP client: {0}")]
    Client(String),

    #[error("Healthcheck failed: request failed: {0}")]
    Request(String),

    #[error("Healthcheck failed: health endpoint returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Perform a health check against a specific port
pub async fn healthcheck_with_port(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .map_err(|e| HealthcheckError::Client(e.to_string()))?;

    let resp = client
        .get(format!("http://127.0.0.1:{port}/v1/health"))
        .send()
        .await
        .map_err(|e| HealthcheckError::Request(e.to_string()))?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(HealthcheckError::Status(resp.status()))
    }
}
