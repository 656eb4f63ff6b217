//! CLI configuration.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # CORS, OpenAPI, request timeout
//! └── service: ServiceConfig        # Store backend, PostgreSQL
//! ```
//!
//! Every option can be given as a flag or an environment variable.
//!
//! ```bash
//! isitlive --store postgres --postgres-url "postgresql://..." --port 8080
//! STORE_BACKEND=postgres POSTGRES_URL="postgresql://..." PORT=8080 isitlive
//! ```

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use isitlive_server::service::{ServiceConfig, StoreBackend};
pub use middleware::MiddlewareConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "isitlive")]
#[command(about = "IsItLive monitor registry server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, OpenAPI, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Monitor store configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads `.env` (when enabled) and parses arguments.
    ///
    /// The `.env` file is read first so clap can use its values as
    /// environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing, filtered by `RUST_LOG` (default `info`).
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration groups.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.middleware
            .validate()
            .context("invalid middleware configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs the configuration without secrets.
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        match self.service.store_backend {
            StoreBackend::Memory => tracing::info!(
                target: TRACING_TARGET_CONFIG,
                backend = %self.service.store_backend,
                "Store configuration"
            ),
            StoreBackend::Postgres => tracing::info!(
                target: TRACING_TARGET_CONFIG,
                backend = %self.service.store_backend,
                postgres_url = %self.service.postgres.database_url_masked(),
                postgres_max_connections = self.service.postgres.postgres_max_connections,
                postgres_connection_timeout_secs = ?self.service.postgres.postgres_connection_timeout_secs,
                postgres_idle_timeout_secs = ?self.service.postgres.postgres_idle_timeout_secs,
                "Store configuration"
            ),
        }
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
