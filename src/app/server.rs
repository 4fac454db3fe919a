use crate::error::ServiceError;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Bind `0.0.0.0:http_port` and serve `app` until `shutdown_token` is cancelled.
pub async fn serve(
    app: Router,
    http_port: u16,
    shutdown_token: CancellationToken,
) -> Result<(), ServiceError> {
    let bind_addr = format!("0.0.0.0:{http_port}");
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ServiceError::Bind {
            address: bind_addr.clone(),
            source: e,
        })?;
    serve_on(listener, app, shutdown_token).await
}

/// Serve `app` on an already bound listener with graceful shutdown.
pub async fn serve_on(
    listener: TcpListener,
    app: Router,
    shutdown_token: CancellationToken,
) -> Result<(), ServiceError> {
    info!("Server listening on {}", listener.local_addr()?);
    info!("  - GET  /v1/health                 (liveness)");
    info!("  - GET  /v1/ready                  (feed-size store readiness)");
    info!("  - POST /assign-layouts/{{user_id}}  (personalised layouts)");
    info!("  - POST /assign-layouts            (anonymous layouts)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_token.cancelled_owned())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Cancel `shutdown_token` on SIGTERM or SIGINT (Ctrl+C).
pub async fn cancel_on_signal(shutdown_token: CancellationToken) {
    shutdown_signal().await;
    shutdown_token.cancel();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        () = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
