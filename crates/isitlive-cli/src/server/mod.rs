//! HTTP server startup and lifecycle.

mod http_server;
mod lifecycle;
mod shutdown;

use std::io;

use axum::Router;

use crate::config::ServerConfig;

/// Binds the configured address and serves `app` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
/// while running.
pub async fn serve(app: Router, config: &ServerConfig) -> io::Result<()> {
    http_server::serve_http(app, config, shutdown::shutdown_signal()).await
}
