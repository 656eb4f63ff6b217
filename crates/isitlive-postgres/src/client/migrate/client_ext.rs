use std::future::Future;

use super::{MigrationResult, run_pending_migrations, verify_schema_integrity};
use crate::{PgClient, PgResult};

/// Migration operations available on a [`PgClient`].
pub trait PgClientMigrationExt {
    /// Applies every embedded migration the database has not seen yet.
    ///
    /// Calling this on an up-to-date database is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails or the database is unreachable.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>>;

    /// Checks that the migration bookkeeping table and the `monitors` table exist.
    fn verify_schema_integrity(&self) -> impl Future<Output = PgResult<()>>;
}

impl PgClientMigrationExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        run_pending_migrations(self).await
    }

    async fn verify_schema_integrity(&self) -> PgResult<()> {
        let mut conn = self.get_connection().await?;
        verify_schema_integrity(&mut conn).await
    }
}
