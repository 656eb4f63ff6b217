//! Monitor repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Monitor, NewMonitor};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Database operations on the `monitors` table.
pub trait MonitorRepository {
    /// Inserts a monitor in a single statement and returns the stored row.
    fn create_monitor(
        &mut self,
        new_monitor: NewMonitor,
    ) -> impl Future<Output = PgResult<Monitor>> + Send;

    /// Finds a monitor by its identifier.
    fn find_monitor_by_id(
        &mut self,
        monitor_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Monitor>>> + Send;

    /// Lists every monitor ordered by name, ties in creation order.
    fn list_monitors(&mut self) -> impl Future<Output = PgResult<Vec<Monitor>>> + Send;
}

impl MonitorRepository for PgConnection {
    async fn create_monitor(&mut self, new_monitor: NewMonitor) -> PgResult<Monitor> {
        use schema::monitors;

        let monitor = diesel::insert_into(monitors::table)
            .values(&new_monitor)
            .returning(Monitor::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(target: TRACING_TARGET_QUERY, monitor_id = %monitor.id, "Monitor inserted");
        Ok(monitor)
    }

    async fn find_monitor_by_id(&mut self, monitor_id: Uuid) -> PgResult<Option<Monitor>> {
        use schema::monitors::dsl::*;

        let monitor = monitors
            .filter(id.eq(monitor_id))
            .select(Monitor::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(monitor)
    }

    async fn list_monitors(&mut self) -> PgResult<Vec<Monitor>> {
        use schema::monitors::dsl::*;

        let rows = monitors
            .order((name.asc(), id.asc()))
            .select(Monitor::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(target: TRACING_TARGET_QUERY, count = rows.len(), "Monitors listed");
        Ok(rows)
    }
}
