use std::sync::Arc;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use isitlive_postgres::{PgClient, PgClientMigrationExt, PgConfig};
use serde::{Deserialize, Serialize};

use crate::service::{InMemoryMonitorStore, MonitorStore, PgMonitorStore, StoreBackend};
use crate::utility::tracing_targets::TRACING_TARGET_SERVICE;
use crate::{Error, Result};

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Default, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Monitor storage backend
    #[cfg_attr(
        feature = "config",
        arg(long = "store", env = "STORE_BACKEND", value_enum, default_value_t = StoreBackend::Memory)
    )]
    #[builder(default)]
    pub store_backend: StoreBackend,

    /// PostgreSQL settings, used by the `postgres` backend.
    #[cfg_attr(feature = "config", command(flatten))]
    #[builder(default)]
    pub postgres: PgConfig,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Validates the settings of the selected backend.
    pub fn validate(&self) -> Result<()> {
        match self.store_backend {
            StoreBackend::Memory => Ok(()),
            StoreBackend::Postgres => self.postgres.validate().map_err(Error::from),
        }
    }

    /// Connects to PostgreSQL and applies pending migrations.
    pub async fn connect_postgres(&self) -> Result<PgClient> {
        let pg_client = PgClient::new_with_test(self.postgres.clone())
            .await
            .map_err(|e| {
                Error::external("postgres", "Failed to connect to the database").with_source(e)
            })?;

        let migrations = pg_client.run_pending_migrations().await.map_err(|e| {
            Error::external("postgres", "Failed to apply database migrations").with_source(e)
        })?;

        pg_client.verify_schema_integrity().await.map_err(|e| {
            Error::external("postgres", "Database schema is incomplete").with_source(e)
        })?;

        if migrations.is_no_op() {
            tracing::info!(target: TRACING_TARGET_SERVICE, "No database migrations were needed");
        } else {
            tracing::info!(
                target: TRACING_TARGET_SERVICE,
                applied = migrations.processed_versions.len(),
                version = migrations.last_processed_version(),
                duration = ?migrations.duration,
                "Database migrations applied"
            );
        }

        Ok(pg_client)
    }

    /// Builds the configured monitor store.
    pub async fn build_store(&self) -> Result<Arc<dyn MonitorStore>> {
        self.validate()?;

        let store: Arc<dyn MonitorStore> = match self.store_backend {
            StoreBackend::Memory => Arc::new(InMemoryMonitorStore::new()),
            StoreBackend::Postgres => Arc::new(PgMonitorStore::new(self.connect_postgres().await?)),
        };

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            backend = %store.backend(),
            "Monitor store ready"
        );

        Ok(store)
    }
}

impl ServiceConfigBuilder {
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if builder.store_backend != Some(StoreBackend::Postgres) {
            return Ok(());
        }

        let postgres = builder.postgres.clone().unwrap_or_default();
        postgres.validate().map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_memory() {
        let config = ServiceConfig::default();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_validates_postgres_settings() {
        let config = ServiceConfig::builder()
            .with_store_backend(StoreBackend::Postgres)
            .with_postgres(PgConfig::default().with_max_connections(100))
            .build();
        assert!(config.is_err());

        let config = ServiceConfig::builder()
            .with_store_backend(StoreBackend::Postgres)
            .build();
        assert!(config.is_ok());
    }

    #[test]
    fn memory_ignores_postgres_settings() {
        let config = ServiceConfig::builder()
            .with_postgres(PgConfig::new(""))
            .build();
        assert!(config.is_ok());
    }

    #[tokio::test]
    async fn builds_memory_store() -> anyhow::Result<()> {
        let store = ServiceConfig::default().build_store().await?;
        assert_eq!(store.backend(), StoreBackend::Memory);
        Ok(())
    }
}
