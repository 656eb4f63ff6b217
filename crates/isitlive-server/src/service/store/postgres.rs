use async_trait::async_trait;
use isitlive_postgres::error::ErrorHint;
use isitlive_postgres::model::{Monitor, NewMonitor};
use isitlive_postgres::query::MonitorRepository;
use isitlive_postgres::{PgClient, PgError};

use super::{
    MonitorId, MonitorRecord, MonitorStore, NewMonitorRecord, StoreBackend, StoreError,
    StoreResult,
};
use crate::utility::tracing_targets::TRACING_TARGET_STORE;

/// Monitor store persisted in PostgreSQL.
///
/// Each operation checks a connection out of the pool and runs one statement.
/// Ids are UUIDv7 and the `name` column uses the `"C"` collation, so
/// `ORDER BY name, id` sorts ordinally with ties in creation order.
#[derive(Debug, Clone)]
pub struct PgMonitorStore {
    client: PgClient,
}

impl PgMonitorStore {
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MonitorStore for PgMonitorStore {
    #[inline]
    fn backend(&self) -> StoreBackend {
        StoreBackend::Postgres
    }

    async fn create(&self, monitor: NewMonitorRecord) -> StoreResult<MonitorRecord> {
        let status = monitor.explicit_status().map(str::to_owned);
        let new_monitor = NewMonitor::new(monitor.name, monitor.url, status);

        let mut conn = self.client.get_connection().await?;
        let row = conn.create_monitor(new_monitor).await?;

        tracing::debug!(target: TRACING_TARGET_STORE, monitor_id = %row.id, "Monitor stored in postgres");
        Ok(row.into())
    }

    async fn get(&self, id: &MonitorId) -> StoreResult<Option<MonitorRecord>> {
        let MonitorId::Uuid(monitor_id) = id else {
            return Ok(None);
        };

        let mut conn = self.client.get_connection().await?;
        let row = conn.find_monitor_by_id(*monitor_id).await?;
        Ok(row.map(Into::into))
    }

    async fn list(&self) -> StoreResult<Vec<MonitorRecord>> {
        let mut conn = self.client.get_connection().await?;
        let rows = conn.list_monitors().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl From<Monitor> for MonitorRecord {
    fn from(row: Monitor) -> Self {
        Self {
            id: MonitorId::Uuid(row.id),
            last_checked_utc: row.last_checked_at(),
            name: row.name,
            url: row.url,
            status: row.status,
        }
    }
}

impl From<PgError> for StoreError {
    fn from(error: PgError) -> Self {
        if let PgError::Timeout(timeout) = &error {
            tracing::warn!(
                target: TRACING_TARGET_STORE,
                kind = ?timeout,
                hint = %timeout.hint(),
                "Database connection pool timed out"
            );
        }

        if error.is_transient() {
            Self::Unavailable(Box::new(error))
        } else {
            Self::Backend(Box::new(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use isitlive_postgres::error::TimeoutType;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn rows_convert_to_records() {
        let id = Uuid::now_v7();
        let row = Monitor {
            id,
            name: "Api".into(),
            url: "https://api.example.com".into(),
            status: "UP".into(),
            last_checked_utc: None,
        };

        let record = MonitorRecord::from(row);
        assert_eq!(record.id, MonitorId::Uuid(id));
        assert_eq!(record.name, "Api");
        assert_eq!(record.status, "UP");
        assert_eq!(record.last_checked_utc, None);
    }

    #[test]
    fn pg_errors_split_by_transience() {
        let timeout = StoreError::from(PgError::Timeout(TimeoutType::Wait));
        assert!(matches!(timeout, StoreError::Unavailable(_)));

        let config = StoreError::from(PgError::Config("bad".into()));
        assert!(matches!(config, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn sequence_ids_skip_the_database() -> anyhow::Result<()> {
        // Connections are lazy, so no database is contacted here.
        let client = isitlive_postgres::PgConfig::default().build()?;
        let store = PgMonitorStore::new(client);

        assert_eq!(store.get(&MonitorId::Sequence(1)).await?, None);
        assert_eq!(store.backend(), StoreBackend::Postgres);
        Ok(())
    }
}
