#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use isitlive_server::handler::openapi_routes;
use isitlive_server::middleware::{
    RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
};
use isitlive_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "isitlive_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "isitlive_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "isitlive_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service)
        .await
        .context("failed to create service state")?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, &cli.server)
        .await
        .context("server terminated with an error")?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// The last layer added is the outermost:
/// 1. Recovery catches panics and enforces timeouts.
/// 2. Observability sets request ids and tracing spans.
/// 3. Security applies CORS, headers and compression.
/// 4. Routes.
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    openapi_routes(middleware.openapi.clone())
        .with_state(state)
        .with_security(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
