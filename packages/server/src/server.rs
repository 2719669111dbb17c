//! Router assembly and the serve loop

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::routes;
use crate::state::AppState;
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tokenward_common::LoggingTransformer;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(routes::login))
        .route("/api/data", get(routes::data))
        .route("/health", get(routes::health))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

// Query strings may carry a token, so only the path is logged.
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        "Request handled"
    );
    response
}

/// Bind `config.bind` and serve until Ctrl-C
///
/// # Errors
/// Returns an error if the key is rejected or the socket cannot be bound
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    let state = AppState::from_config(&config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    LoggingTransformer::log_server_startup(&listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
