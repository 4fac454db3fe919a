pub mod router;
pub mod server;
mod state;
pub mod tracing;

pub use state::AppState;

use crate::config;
use crate::error::ServiceError;
use tokio_util::sync::CancellationToken;

/// Application entry point. Initializes tracing, configuration, the
/// feed-size store connection, and starts the server.
pub async fn run() -> Result<(), ServiceError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(crate::healthcheck::DEFAULT_HTTP_PORT);
        match crate::healthcheck_with_port(port).await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings = config::get_configuration()?;
    ::tracing::info!(
        http_port = settings.http_port,
        redis_host = %settings.redis_host,
        redis_port = settings.redis_port,
        "Loaded settings"
    );

    // The store connection must be up before the listener accepts requests.
    let app_state = AppState::from_settings(&settings).await?;
    let app = router::main_router(app_state);

    let shutdown_token = CancellationToken::new();
    tokio::spawn(server::cancel_on_signal(shutdown_token.clone()));

    server::serve(app, settings.http_port, shutdown_token).await
}
